//! Serializable shape descriptions
//!
//! Level and prefab files describe colliders as a [`ShapeTemplate`]; the
//! concrete [`Shape`] is built once the data has been validated.

use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::polygon::Polygon;
use super::shape::Shape;
use super::ShapeError;
use crate::foundation::math::Vec2;

/// Data-driven shape definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeTemplate {
    /// Circle of the given radius
    Circle {
        /// Unscaled radius
        radius: f32,
    },
    /// Convex polygon, clockwise points
    Polygon {
        /// Local-space points
        points: Vec<Vec2>,
    },
    /// Regular polygon
    RegularPolygon {
        /// Number of vertices (at least 3)
        vertex_count: usize,
        /// Circumscribed radius
        radius: f32,
    },
    /// Axis-aligned box centered on the owner
    Box {
        /// Box width
        width: f32,
        /// Box height
        height: f32,
    },
}

impl ShapeTemplate {
    /// Validate and build the shape
    pub fn build(&self) -> Result<Shape, ShapeError> {
        let shape = match self {
            Self::Circle { radius } => Shape::Circle(Circle::try_new(*radius)?),
            Self::Polygon { points } => Shape::Polygon(Polygon::try_from_points(points)?),
            Self::RegularPolygon {
                vertex_count,
                radius,
            } => Shape::Polygon(Polygon::try_regular(*vertex_count, *radius)?),
            Self::Box { width, height } => Shape::Polygon(Polygon::try_new_box(*width, *height)?),
        };
        Ok(shape)
    }
}
