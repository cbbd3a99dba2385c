//! Narrow-phase collision detection
//!
//! Shapes keep an immutable local template and a world-space cache that is
//! refreshed from the owner's transform on demand. Queries assume the cache
//! is current and never mutate geometry, apart from the lazily rebuilt
//! polygon edge normals.
//!
//! # Module Organization
//!
//! - [`primitives`] - Stateless line, circle, point and rectangle tests
//! - [`rect`] - Axis-aligned rectangle used for bounds
//! - [`polygon`], [`circle`] - The concrete shapes
//! - [`shape`] - Closed shape set and pair dispatch
//! - [`shape_collisions`] - Separating axis and analytic pair tests
//! - [`template`] - Serializable shape descriptions
//!
//! # Conventions
//!
//! Screen space, +Y down. A [`CollisionResult`] normal points from the
//! first shape toward the second; subtract its translation vector from the
//! first shape's position to separate the pair.

pub mod circle;
mod error;
pub mod polygon;
pub mod primitives;
pub mod rect;
pub mod results;
pub mod shape;
pub mod shape_collisions;
pub mod template;
pub mod transform;

// Re-export commonly used types
pub use circle::Circle;
pub use error::{CollisionError, ShapeError};
pub use polygon::Polygon;
pub use primitives::PointSectors;
pub use rect::Rect;
pub use results::{CollisionResult, RaycastHit};
pub use shape::Shape;
pub use template::ShapeTemplate;
pub use transform::{ColliderPose, ColliderTransform};
