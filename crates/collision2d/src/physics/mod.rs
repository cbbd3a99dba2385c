//! 2D collision detection
//!
//! [`collision`] holds the shapes and the narrow phase; [`ColliderSet`]
//! owns colliders and runs queries across all of them.

pub mod collider_set;
pub mod collision;
pub mod collision_layers;

pub use collider_set::{ColliderEntry, ColliderId, ColliderSet};
pub use collision::{
    Circle, ColliderPose, ColliderTransform, CollisionError, CollisionResult, Polygon,
    RaycastHit, Rect, Shape, ShapeError, ShapeTemplate,
};
pub use collision_layers::CollisionLayers;
