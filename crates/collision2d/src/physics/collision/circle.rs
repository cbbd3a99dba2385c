//! Circle shape

use super::rect::Rect;
use super::transform::ColliderTransform;
use super::ShapeError;
use crate::foundation::math::{
    utils::{point_on_circle, rad_to_deg},
    Vec2,
};

/// Circle collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    radius: f32,
    original_radius: f32,
    position: Vec2,
    center: Vec2,
    bounds: Rect,
}

impl Circle {
    /// Create a circle of `radius` at the origin
    ///
    /// # Panics
    /// Panics if `radius` is negative or NaN.
    pub fn new(radius: f32) -> Self {
        assert!(radius >= 0.0, "circle radius must be non-negative, got {radius}");
        Self {
            radius,
            original_radius: radius,
            position: Vec2::zeros(),
            center: Vec2::zeros(),
            bounds: Rect::new(-radius, -radius, radius * 2.0, radius * 2.0),
        }
    }

    /// Validating version of [`Circle::new`]
    pub fn try_new(radius: f32) -> Result<Self, ShapeError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self::new(radius))
    }

    /// Current (possibly scaled) radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Radius before the owner's scale is applied
    pub fn original_radius(&self) -> f32 {
        self.original_radius
    }

    /// Change the unscaled radius. Takes effect on the next bounds recompute.
    ///
    /// # Panics
    /// Panics if `radius` is negative or NaN.
    pub fn set_radius(&mut self, radius: f32) {
        assert!(radius >= 0.0, "circle radius must be non-negative, got {radius}");
        self.original_radius = radius;
        self.radius = radius;
    }

    /// World center
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Offset from the owner position, after scale and rotation
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Axis-aligned box around the circle
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Refresh radius, position and bounds from the owner's transform.
    ///
    /// The radius scales by the larger scale component.
    pub fn recalculate_bounds<T: ColliderTransform + ?Sized>(&mut self, transform: &T) {
        let local_offset = transform.local_offset();
        self.center = local_offset;
        self.radius = self.original_radius;

        if transform.follows_transform() {
            let scale = transform.scale();
            let has_unit_scale = scale == Vec2::new(1.0, 1.0);
            let max_scale = scale.x.max(scale.y);
            self.radius = self.original_radius * max_scale;

            let scaled_offset = local_offset.component_mul(&scale);
            if !has_unit_scale {
                self.center = scaled_offset;
            }

            if transform.rotation() != 0.0 {
                let offset_angle = rad_to_deg(scaled_offset.y.atan2(scaled_offset.x));
                let offset_length = if has_unit_scale {
                    local_offset.norm()
                } else {
                    scaled_offset.norm()
                };
                self.center = point_on_circle(
                    &Vec2::zeros(),
                    offset_length,
                    transform.rotation_degrees() + offset_angle,
                );
            }
        }

        self.position = transform.position() + self.center;
        self.bounds = Rect::new(
            self.position.x - self.radius,
            self.position.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        );
    }

    /// World point on the circumference at `angle` radians
    pub fn point_along_edge(&self, angle: f32) -> Vec2 {
        Vec2::new(
            self.position.x + self.radius * angle.cos(),
            self.position.y + self.radius * angle.sin(),
        )
    }

    /// Check if `point` lies inside or on the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        (point - self.position).norm_squared() <= self.radius * self.radius
    }
}
