//! Query results produced by the narrow phase
//!
//! Both types are transient: every query builds a fresh value owned by the
//! caller.

use crate::foundation::math::Vec2;
use crate::physics::collider_set::ColliderId;

/// Outcome of a shape-vs-shape (or point-vs-shape) collision test
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResult {
    /// Unit axis of minimum separation, pointing from the first shape toward the second
    pub normal: Vec2,
    /// `normal * penetration_depth`. Subtract it from the first shape's
    /// position to separate the pair. Zero length means the shapes are only touching.
    pub minimum_translation_vector: Vec2,
    /// Representative contact point in world space, when the test produces one
    pub point: Option<Vec2>,
}

impl CollisionResult {
    /// Create a result from a normal and penetration depth
    pub fn new(normal: Vec2, depth: f32) -> Self {
        Self {
            normal,
            minimum_translation_vector: normal * depth,
            point: None,
        }
    }

    /// Attach a contact point
    pub fn with_point(mut self, point: Vec2) -> Self {
        self.point = Some(point);
        self
    }

    /// Penetration depth along the normal
    pub fn depth(&self) -> f32 {
        self.minimum_translation_vector.norm()
    }

    /// Displacement that moves the first shape out of the second
    pub fn separation(&self) -> Vec2 {
        -self.minimum_translation_vector
    }

    /// The same collision seen from the second shape's side
    pub fn inverted(self) -> Self {
        Self {
            normal: -self.normal,
            minimum_translation_vector: -self.minimum_translation_vector,
            point: self.point,
        }
    }
}

/// Outcome of a line or ray query that hit something
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Position of the hit along the query segment, in `[0, 1]`
    pub fraction: f32,
    /// World distance from the segment start to the hit point
    pub distance: f32,
    /// World-space contact point
    pub point: Vec2,
    /// Unit surface normal at the contact point
    pub normal: Vec2,
    /// Collider that was hit, filled in by [`ColliderSet`](crate::physics::ColliderSet) queries
    pub collider: Option<ColliderId>,
}

impl RaycastHit {
    /// Create a hit not yet associated with a collider
    pub fn new(fraction: f32, distance: f32, point: Vec2, normal: Vec2) -> Self {
        Self {
            fraction,
            distance,
            point,
            normal,
            collider: None,
        }
    }

    /// Stamp the collider that produced this hit
    pub fn with_collider(mut self, collider: ColliderId) -> Self {
        self.collider = Some(collider);
        self
    }
}
