//! Stateless geometric primitives
//!
//! Line, circle, point and rectangle intersection tests plus closest-point
//! queries. Everything here is a pure function of its arguments; the shape
//! types and the narrow phase build on top of these.

use bitflags::bitflags;
use log::trace;

use super::rect::Rect;
use crate::foundation::math::{utils::cross, Vec2};

bitflags! {
    /// Which side(s) of a rectangle a point lies beyond.
    ///
    /// An empty set means the point is inside (the center sector).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointSectors: u8 {
        /// Above the top edge (y smaller than the rectangle's top)
        const TOP = 1 << 0;
        /// Below the bottom edge
        const BOTTOM = 1 << 1;
        /// Left of the left edge
        const LEFT = 1 << 2;
        /// Right of the right edge
        const RIGHT = 1 << 3;
        /// Above and left
        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        /// Above and right
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        /// Below and left
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        /// Below and right
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

impl PointSectors {
    /// The inside of the rectangle
    pub const CENTER: Self = Self::empty();

    /// Check if this is the center sector
    pub fn is_center(self) -> bool {
        self.is_empty()
    }
}

/// Solve the intersection of segments `a1-a2` and `b1-b2`.
///
/// Returns `(t, point)` where `t` is the parameter along `a1-a2`.
/// Parallel segments, collinear overlap included, never intersect.
pub fn line_to_line_parametric(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<(f32, Vec2)> {
    let b = a2 - a1;
    let d = b2 - b1;
    let b_dot_d_perp = cross(&b, &d);

    // Parallel lines
    if b_dot_d_perp == 0.0 {
        return None;
    }

    let c = b1 - a1;
    let t = cross(&c, &d) / b_dot_d_perp;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let u = cross(&c, &b) / b_dot_d_perp;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some((t, a1 + b * t))
}

/// Check if segments `a1-a2` and `b1-b2` intersect
pub fn line_to_line(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    line_to_line_parametric(a1, a2, b1, b2).is_some()
}

/// Intersection point of segments `a1-a2` and `b1-b2`, if any
pub fn line_to_line_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    line_to_line_parametric(a1, a2, b1, b2).map(|(_, point)| point)
}

/// Closest point to `point` on the segment `line_a-line_b`.
///
/// A zero-length segment has no direction to project onto; its only point
/// `line_a` is returned.
pub fn closest_point_on_line(line_a: Vec2, line_b: Vec2, point: Vec2) -> Vec2 {
    let v = line_b - line_a;
    let w = point - line_a;
    let v_len_sq = v.dot(&v);
    if v_len_sq == 0.0 {
        trace!("closest_point_on_line: zero-length segment at {:?}", line_a);
        return line_a;
    }

    let t = (w.dot(&v) / v_len_sq).clamp(0.0, 1.0);
    line_a + v * t
}

/// Check if two circles overlap (touching does not count)
pub fn circle_to_circle(center1: Vec2, radius1: f32, center2: Vec2, radius2: f32) -> bool {
    let radius_sum = radius1 + radius2;
    (center1 - center2).norm_squared() < radius_sum * radius_sum
}

/// Check if a circle overlaps the segment `line_from-line_to`
pub fn circle_to_line(center: Vec2, radius: f32, line_from: Vec2, line_to: Vec2) -> bool {
    let closest = closest_point_on_line(line_from, line_to, center);
    (center - closest).norm_squared() < radius * radius
}

/// Check if `point` lies strictly inside a circle
pub fn circle_to_point(center: Vec2, radius: f32, point: Vec2) -> bool {
    (center - point).norm_squared() < radius * radius
}

/// Classify `point` against `rect`. See [`PointSectors`].
pub fn get_sector(rect: &Rect, point: Vec2) -> PointSectors {
    let mut sector = PointSectors::CENTER;

    if point.x < rect.left() {
        sector |= PointSectors::LEFT;
    } else if point.x >= rect.right() {
        sector |= PointSectors::RIGHT;
    }

    if point.y < rect.top() {
        sector |= PointSectors::TOP;
    } else if point.y >= rect.bottom() {
        sector |= PointSectors::BOTTOM;
    }

    sector
}

/// Rectangle edges as `(sector, from, to)`
fn rect_edges(rect: &Rect) -> [(PointSectors, Vec2, Vec2); 4] {
    let top_left = rect.location();
    let top_right = Vec2::new(rect.right(), rect.top());
    let bottom_left = Vec2::new(rect.left(), rect.bottom());
    let bottom_right = rect.max();

    [
        (PointSectors::TOP, top_left, top_right),
        (PointSectors::BOTTOM, bottom_left, bottom_right),
        (PointSectors::LEFT, top_left, bottom_left),
        (PointSectors::RIGHT, top_right, bottom_right),
    ]
}

/// Check if `point` lies inside `rect` (half-open, see [`Rect::contains`])
pub fn rect_to_point(rect: &Rect, point: Vec2) -> bool {
    rect.contains(point)
}

/// Check if a circle overlaps `rect`.
///
/// Only the edges facing the circle's center sector are tested.
pub fn rect_to_circle(rect: &Rect, center: Vec2, radius: f32) -> bool {
    if rect_to_point(rect, center) {
        return true;
    }

    let sector = get_sector(rect, center);
    rect_edges(rect)
        .iter()
        .filter(|(side, _, _)| sector.intersects(*side))
        .any(|(_, from, to)| circle_to_line(center, radius, *from, *to))
}

/// Check if the segment `line_from-line_to` touches `rect`.
///
/// Segments with an endpoint inside are accepted, segments whose endpoints
/// share an outside sector are rejected, and only the edges named by the
/// combined sectors are tested otherwise.
pub fn rect_to_line(rect: &Rect, line_from: Vec2, line_to: Vec2) -> bool {
    let from_sector = get_sector(rect, line_from);
    let to_sector = get_sector(rect, line_to);

    if from_sector.is_center() || to_sector.is_center() {
        return true;
    }

    if from_sector.intersects(to_sector) {
        return false;
    }

    let both = from_sector | to_sector;
    rect_edges(rect)
        .iter()
        .filter(|(side, _, _)| both.intersects(*side))
        .any(|(_, from, to)| line_to_line(*from, *to, line_from, line_to))
}
