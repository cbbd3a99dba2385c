//! # collision2d
//!
//! Narrow-phase 2D collision geometry for games.
//!
//! ## Features
//!
//! - **Convex shapes**: circles, polygons and boxes with world-space caches
//! - **Separating axis tests**: overlap, minimum translation vector and contact point
//! - **Queries**: point containment and line/ray casts against any shape
//! - **Collider arena**: slotmap-backed set with layer masks and whole-set linecasts
//! - **Data-driven**: shape templates and configuration load from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use collision2d::prelude::*;
//!
//! let mut colliders = ColliderSet::new();
//! let player = colliders.insert(
//!     Shape::new_box(2.0, 2.0),
//!     ColliderPose::identity(),
//!     CollisionLayers::PLAYER,
//! );
//! let wall = colliders.insert(
//!     Shape::new_box(2.0, 2.0),
//!     ColliderPose::from_position(Vec2::new(1.0, 0.0)),
//!     CollisionLayers::ENVIRONMENT,
//! );
//!
//! let result = colliders.collide(player, wall)?.expect("boxes overlap");
//! // Push the player out of the wall
//! assert_eq!(result.separation(), Vec2::new(-1.0, 0.0));
//! # Ok::<(), collision2d::physics::CollisionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for collision users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        foundation::math::Vec2,
        physics::{
            Circle, ColliderId, ColliderPose, ColliderSet, ColliderTransform, CollisionError,
            CollisionLayers, CollisionResult, Polygon, RaycastHit, Rect, Shape, ShapeError,
            ShapeTemplate,
        },
    };
}
