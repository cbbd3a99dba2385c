//! Math utilities and types
//!
//! Provides the 2D math types used by the collision core. Coordinates are
//! screen space: +X right, +Y down.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 3x3 matrix type (homogeneous 2D affine transform)
pub type Mat3 = Matrix3<f32>;

/// Squared lengths below this are treated as zero when normalizing
pub const EPSILON: f32 = 1e-12;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2, EPSILON};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// 2D cross product (z component of the 3D cross product)
    #[inline]
    pub fn cross(a: &Vec2, b: &Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Perpendicular of the edge `from -> to`: the edge direction rotated
    /// by -90 degrees, `(dy, -dx)`. Not normalized.
    #[inline]
    pub fn perpendicular(from: &Vec2, to: &Vec2) -> Vec2 {
        let edge = to - from;
        Vec2::new(edge.y, -edge.x)
    }

    /// Normalize `v`, or return `None` when it has (near) zero length
    #[inline]
    pub fn safe_normalize(v: &Vec2) -> Option<Vec2> {
        let len_sq = v.norm_squared();
        if len_sq <= EPSILON || !len_sq.is_finite() {
            None
        } else {
            Some(v / len_sq.sqrt())
        }
    }

    /// Point on the circle of `radius` around `center` at `angle_degrees`
    pub fn point_on_circle(center: &Vec2, radius: f32, angle_degrees: f32) -> Vec2 {
        let radians = deg_to_rad(angle_degrees);
        Vec2::new(center.x + radians.cos() * radius, center.y + radians.sin() * radius)
    }
}
