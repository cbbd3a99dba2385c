//! Collision error types

use crate::physics::collider_set::ColliderId;

/// Shape construction rejected untrusted input
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Polygon with fewer than 3 points
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    /// NaN or infinite coordinate
    #[error("polygon point {0} is not finite")]
    NonFinitePoint(usize),

    /// Regular polygon with fewer than 3 vertices
    #[error("regular polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Negative, zero (for polygons) or non-finite radius
    #[error("invalid radius: {0}")]
    InvalidRadius(f32),

    /// Non-positive or non-finite box dimensions
    #[error("invalid box size: {width} x {height}")]
    InvalidBoxSize {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },
}

/// Collider arena errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// The id doesn't name a live collider
    #[error("unknown collider: {0:?}")]
    UnknownCollider(ColliderId),
}
