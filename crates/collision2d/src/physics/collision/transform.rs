//! Read-only transform contract between shapes and their owner
//!
//! Shapes never own or mutate transforms. Whatever owns the scene graph
//! implements [`ColliderTransform`] and hands it to
//! [`Shape::recalculate_bounds`](super::Shape::recalculate_bounds) whenever
//! the transform changes. [`ColliderPose`] is the plain-data implementation
//! used by [`ColliderSet`](crate::physics::ColliderSet) and in tests.

use crate::foundation::math::{utils::rad_to_deg, Vec2};

/// What a shape needs to know about the collider that owns it
pub trait ColliderTransform {
    /// World position of the owning entity
    fn position(&self) -> Vec2;

    /// World rotation in radians
    fn rotation(&self) -> f32;

    /// World rotation in degrees
    fn rotation_degrees(&self) -> f32 {
        rad_to_deg(self.rotation())
    }

    /// World scale
    fn scale(&self) -> Vec2;

    /// Offset of the shape from the entity position, in unscaled, unrotated space
    fn local_offset(&self) -> Vec2;

    /// Whether the shape follows the owner's scale and rotation
    fn follows_transform(&self) -> bool;

    /// Whether rotation changed since the last bounds recompute
    fn is_rotation_dirty(&self) -> bool;
}

/// Plain-data collider transform
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderPose {
    /// World position
    pub position: Vec2,
    /// World rotation in radians
    pub rotation: f32,
    /// World scale
    pub scale: Vec2,
    /// Shape offset from the position
    pub local_offset: Vec2,
    /// Follow the owner's scale and rotation
    pub scale_and_rotate_with_transform: bool,
    rotation_dirty: bool,
}

impl Default for ColliderPose {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            local_offset: Vec2::zeros(),
            scale_and_rotate_with_transform: true,
            rotation_dirty: true,
        }
    }
}

impl ColliderPose {
    /// Create identity pose
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position, rotation and scale
    pub fn from_transform(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Default::default()
        }
    }

    /// Set the shape offset
    pub fn with_local_offset(mut self, offset: Vec2) -> Self {
        self.local_offset = offset;
        self
    }

    /// Set whether the shape follows scale and rotation
    pub fn with_scale_and_rotate(mut self, enabled: bool) -> Self {
        self.scale_and_rotate_with_transform = enabled;
        self
    }

    /// Change the rotation, flagging it dirty if it actually changed
    pub fn set_rotation(&mut self, radians: f32) {
        if self.rotation != radians {
            self.rotation = radians;
            self.rotation_dirty = true;
        }
    }

    /// Mark rotation as consumed after a bounds recompute
    pub fn clear_rotation_dirty(&mut self) {
        self.rotation_dirty = false;
    }
}

impl ColliderTransform for ColliderPose {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn local_offset(&self) -> Vec2 {
        self.local_offset
    }

    fn follows_transform(&self) -> bool {
        self.scale_and_rotate_with_transform
    }

    fn is_rotation_dirty(&self) -> bool {
        self.rotation_dirty
    }
}
