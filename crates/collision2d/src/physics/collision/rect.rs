//! Axis-aligned rectangle used for shape bounds
//!
//! Stored as top-left location plus size. In screen space the top edge is
//! the minimum Y.

use crate::foundation::math::Vec2;
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (`x`, `y` is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Smallest rectangle enclosing every point. Empty input gives a zero rect.
    pub fn encompassing_points(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Self::from_min_max(min, max)
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Check if this rectangle overlaps another (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let min = Vec2::new(self.x.min(other.x), self.y.min(other.y));
        let max = Vec2::new(self.right().max(other.right()), self.bottom().max(other.bottom()));
        Self::from_min_max(min, max)
    }

    /// Nearest point of the closed rectangle, edges included
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Closest point on the border to `point`, plus the outward normal of
    /// the edge it lies on.
    ///
    /// Points inside are pushed to the nearest edge; points outside are
    /// clamped. Ties between edges resolve left, right, top, bottom.
    pub fn closest_point_on_border(&self, point: Vec2) -> (Vec2, Vec2) {
        let mut res = self.clamp_point(point);
        let mut normal = Vec2::zeros();

        if self.contains(point) {
            let dl = res.x - self.left();
            let dr = self.right() - res.x;
            let dt = res.y - self.top();
            let db = self.bottom() - res.y;

            let min = dl.min(dr).min(dt).min(db);
            if min == dl {
                res.x = self.left();
                normal.x = -1.0;
            } else if min == dr {
                res.x = self.right();
                normal.x = 1.0;
            } else if min == dt {
                res.y = self.top();
                normal.y = -1.0;
            } else {
                res.y = self.bottom();
                normal.y = 1.0;
            }
        } else {
            if res.x == self.left() {
                normal.x = -1.0;
            }
            if res.x == self.right() {
                normal.x = 1.0;
            }
            if res.y == self.top() {
                normal.y = -1.0;
            }
            if res.y == self.bottom() {
                normal.y = 1.0;
            }
            // Corner regions get a diagonal normal
            if normal.x != 0.0 && normal.y != 0.0 {
                normal = normal.normalize();
            }
        }

        (res, normal)
    }

    /// Point on the border closest to the origin. Used on a Minkowski
    /// difference, where it is the minimum translation between two boxes.
    pub fn closest_point_on_bounds_to_origin(&self) -> Vec2 {
        let max = self.max();
        let mut min_dist = self.x.abs();
        let mut bounds_point = Vec2::new(self.x, 0.0);

        if max.x.abs() < min_dist {
            min_dist = max.x.abs();
            bounds_point = Vec2::new(max.x, 0.0);
        }

        if max.y.abs() < min_dist {
            min_dist = max.y.abs();
            bounds_point = Vec2::new(0.0, max.y);
        }

        if self.y.abs() < min_dist {
            bounds_point = Vec2::new(0.0, self.y);
        }

        bounds_point
    }
}

impl AbsDiffEq for Rect {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.width.abs_diff_eq(&other.width, epsilon)
            && self.height.abs_diff_eq(&other.height, epsilon)
    }
}

impl RelativeEq for Rect {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.width.relative_eq(&other.width, epsilon, max_relative)
            && self.height.relative_eq(&other.height, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_encompassing_points() {
        let points = [
            Vec2::new(-1.0, 2.0),
            Vec2::new(3.0, -4.0),
            Vec2::new(0.5, 0.5),
        ];
        let rect = Rect::encompassing_points(&points);
        assert_relative_eq!(rect, Rect::new(-1.0, -4.0, 4.0, 6.0));
        assert_eq!(Rect::encompassing_points(&[]), Rect::default());
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(a.intersects(&Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.intersects(&Rect::new(2.0, 0.0, 2.0, 2.0)));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, -1.0, 1.0, 1.0);
        assert_relative_eq!(a.union(&b), Rect::new(0.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn test_closest_point_on_border_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (point, normal) = rect.closest_point_on_border(Vec2::new(2.0, 5.0));
        assert_eq!(point, Vec2::new(0.0, 5.0));
        assert_eq!(normal, Vec2::new(-1.0, 0.0));

        let (point, normal) = rect.closest_point_on_border(Vec2::new(5.0, 9.0));
        assert_eq!(point, Vec2::new(5.0, 10.0));
        assert_eq!(normal, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_closest_point_on_border_outside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (point, normal) = rect.closest_point_on_border(Vec2::new(15.0, 5.0));
        assert_eq!(point, Vec2::new(10.0, 5.0));
        assert_eq!(normal, Vec2::new(1.0, 0.0));

        // Corner regions clamp onto the vertex
        let (point, normal) = rect.closest_point_on_border(Vec2::new(-1.0, -1.0));
        assert_eq!(point, Vec2::new(0.0, 0.0));
        assert_relative_eq!(normal, Vec2::new(-1.0, -1.0).normalize());

        let (point, normal) = rect.closest_point_on_border(Vec2::new(12.0, 14.0));
        assert_eq!(point, Vec2::new(10.0, 10.0));
        assert_relative_eq!(normal, Vec2::new(1.0, 1.0).normalize());
    }

    #[test]
    fn test_clamp_point() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.clamp_point(Vec2::new(4.0, 6.0)), Vec2::new(4.0, 6.0));
        assert_eq!(rect.clamp_point(Vec2::new(-3.0, 6.0)), Vec2::new(0.0, 6.0));
        assert_eq!(rect.clamp_point(Vec2::new(12.0, 11.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_closest_point_to_origin() {
        // Minkowski difference of [-1,1]^2 and [0,2]x[-1,1]
        let md = Rect::new(-3.0, -2.0, 4.0, 4.0);
        assert_eq!(md.closest_point_on_bounds_to_origin(), Vec2::new(1.0, 0.0));
    }
}
