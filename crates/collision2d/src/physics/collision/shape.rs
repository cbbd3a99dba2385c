//! Collision shape dispatch
//!
//! [`Shape`] is the closed set of narrow-phase shapes. Pair queries match
//! on both variants and route to [`shape_collisions`](super::shape_collisions),
//! taking the axis-aligned fast paths while a box is unrotated.

use super::circle::Circle;
use super::polygon::Polygon;
use super::primitives;
use super::rect::Rect;
use super::results::{CollisionResult, RaycastHit};
use super::shape_collisions;
use super::transform::ColliderTransform;
use crate::foundation::math::Vec2;

/// A collision shape in world space
#[derive(Debug, Clone)]
pub enum Shape {
    /// Circle, tested analytically
    Circle(Circle),
    /// Convex polygon or box, tested with separating axes
    Polygon(Polygon),
}

impl Shape {
    /// Creates a circle of the given radius
    pub fn circle(radius: f32) -> Self {
        Self::Circle(Circle::new(radius))
    }

    /// Creates a convex polygon from clockwise points
    pub fn polygon(points: &[Vec2]) -> Self {
        Self::Polygon(Polygon::from_points(points))
    }

    /// Creates a regular polygon
    pub fn regular_polygon(vertex_count: usize, radius: f32) -> Self {
        Self::Polygon(Polygon::regular(vertex_count, radius))
    }

    /// Creates a box centered on its owner
    pub fn new_box(width: f32, height: f32) -> Self {
        Self::Polygon(Polygon::new_box(width, height))
    }

    /// Short variant name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Polygon(polygon) if polygon.is_box() => "box",
            Self::Polygon(_) => "polygon",
        }
    }

    /// World reference point
    pub fn position(&self) -> Vec2 {
        match self {
            Self::Circle(circle) => circle.position(),
            Self::Polygon(polygon) => polygon.position(),
        }
    }

    /// Offset from the owner position
    pub fn center(&self) -> Vec2 {
        match self {
            Self::Circle(circle) => circle.center(),
            Self::Polygon(polygon) => polygon.center(),
        }
    }

    /// World axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Circle(circle) => circle.bounds(),
            Self::Polygon(polygon) => polygon.bounds(),
        }
    }

    /// Refresh the world cache from the owner's transform.
    ///
    /// Must be called whenever the owner moves, rotates or scales, before
    /// any query involving this shape.
    pub fn recalculate_bounds<T: ColliderTransform + ?Sized>(&mut self, transform: &T) {
        match self {
            Self::Circle(circle) => circle.recalculate_bounds(transform),
            Self::Polygon(polygon) => polygon.recalculate_bounds(transform),
        }
    }

    /// Cheap intersection test with no result details
    pub fn overlaps(&self, other: &Shape) -> bool {
        match (self, other) {
            (Self::Polygon(a), Self::Polygon(b)) => {
                if is_axis_aligned_box(a) && is_axis_aligned_box(b) {
                    a.bounds().intersects(&b.bounds())
                } else {
                    shape_collisions::polygon_to_polygon(a, b).is_some()
                }
            }
            (Self::Polygon(polygon), Self::Circle(circle))
            | (Self::Circle(circle), Self::Polygon(polygon)) => {
                if is_axis_aligned_box(polygon) {
                    // Touching counts, as in circle_to_polygon
                    let center = circle.position();
                    let closest = polygon.bounds().clamp_point(center);
                    (closest - center).norm_squared() <= circle.radius() * circle.radius()
                } else {
                    shape_collisions::circle_to_polygon(circle, polygon).is_some()
                }
            }
            (Self::Circle(a), Self::Circle(b)) => {
                primitives::circle_to_circle(a.position(), a.radius(), b.position(), b.radius())
            }
        }
    }

    /// Full collision test. The result is from this shape's point of view:
    /// the normal points toward `other`.
    pub fn collides_with_shape(&self, other: &Shape) -> Option<CollisionResult> {
        match (self, other) {
            (Self::Polygon(a), Self::Polygon(b)) => {
                if is_axis_aligned_box(a) && is_axis_aligned_box(b) {
                    shape_collisions::box_to_box(a, b)
                } else {
                    shape_collisions::polygon_to_polygon(a, b)
                }
            }
            (Self::Circle(circle), Self::Polygon(polygon)) => {
                shape_collisions::circle_to_polygon(circle, polygon)
            }
            (Self::Polygon(polygon), Self::Circle(circle)) => {
                shape_collisions::circle_to_polygon(circle, polygon).map(CollisionResult::inverted)
            }
            (Self::Circle(a), Self::Circle(b)) => shape_collisions::circle_to_circle(a, b),
        }
    }

    /// First hit of the segment `start-end` against this shape
    pub fn collides_with_line(&self, start: Vec2, end: Vec2) -> Option<RaycastHit> {
        match self {
            Self::Circle(circle) => shape_collisions::line_to_circle(start, end, circle),
            Self::Polygon(polygon) => shape_collisions::line_to_polygon(start, end, polygon),
        }
    }

    /// Check if a world point lies inside the shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self {
            Self::Circle(circle) => circle.contains_point(point),
            Self::Polygon(polygon) => polygon.contains_point(point),
        }
    }

    /// Collision between a world point and this shape, with the point as
    /// the first shape. `separation()` on the result pushes the point out.
    pub fn point_collides_with_shape(&self, point: Vec2) -> Option<CollisionResult> {
        match self {
            Self::Circle(circle) => shape_collisions::point_to_circle(point, circle),
            Self::Polygon(polygon) if is_axis_aligned_box(polygon) => {
                shape_collisions::point_to_box(point, polygon)
            }
            Self::Polygon(polygon) => shape_collisions::point_to_polygon(point, polygon),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

fn is_axis_aligned_box(polygon: &Polygon) -> bool {
    polygon.is_box() && polygon.is_unrotated()
}
