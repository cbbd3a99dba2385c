//! Narrow-phase pair tests
//!
//! Every function takes shapes whose world cache is current (see
//! `recalculate_bounds`) and reports the result from the first argument's
//! point of view: the normal points from the first shape toward the second.
//!
//! Polygon pairs use the separating axis theorem over both polygons' edge
//! normals. Axis selection is order independent, so swapping the arguments
//! yields an exactly negated normal and translation vector.

use std::cmp::Ordering;

use log::trace;

use super::circle::Circle;
use super::polygon::{closest_point_on_polygon_to_point, winding_sign, Polygon};
use super::primitives::line_to_line_parametric;
use super::rect::Rect;
use super::results::{CollisionResult, RaycastHit};
use crate::foundation::math::{
    utils::{perpendicular, safe_normalize},
    Vec2, EPSILON,
};

/// Min and max projection of `points` onto `axis`
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::MIN), |(min, max), p| {
        let d = p.dot(&axis);
        (min.min(d), max.max(d))
    })
}

/// Sign-normalized axis, used to compare axes regardless of orientation
fn canonical_axis(axis: Vec2) -> Vec2 {
    if axis.x > 0.0 || (axis.x == 0.0 && axis.y > 0.0) {
        axis
    } else {
        -axis
    }
}

/// Penetration of `first` into `second` along `axis`.
///
/// Returns the axis oriented from first toward second and the overlap
/// depth, which is zero or negative when the intervals don't overlap.
fn axis_penetration(
    first: (f32, f32),
    second: (f32, f32),
    axis: Vec2,
    offset: Vec2,
) -> (Vec2, f32) {
    let (min_a, max_a) = first;
    let (min_b, max_b) = second;

    // Pushing first back along -axis vs along +axis
    let forward = max_a - min_b;
    let backward = max_b - min_a;

    match forward.partial_cmp(&backward) {
        Some(Ordering::Less) => (axis, forward),
        Some(Ordering::Greater) => (-axis, backward),
        _ => {
            // Intervals centered on each other: orient by the shape offset,
            // then push the wider interval along the canonical axis
            let along = offset.dot(&axis);
            let size_diff = (max_a - min_a) - (max_b - min_b);
            let oriented = if along > 0.0 {
                axis
            } else if along < 0.0 {
                -axis
            } else if size_diff < 0.0 {
                -canonical_axis(axis)
            } else {
                canonical_axis(axis)
            };
            (oriented, forward.min(backward))
        }
    }
}

/// Keep the shallower of two candidate axes. Equal depths pick the
/// lexicographically smaller canonical axis so the winner doesn't depend
/// on which polygon contributed it.
fn keep_shallowest(best: &mut Option<(Vec2, f32)>, axis: Vec2, depth: f32) {
    let replace = match *best {
        None => true,
        Some((best_axis, best_depth)) => {
            if depth != best_depth {
                depth < best_depth
            } else {
                let a = canonical_axis(axis);
                let b = canonical_axis(best_axis);
                (a.x, a.y) < (b.x, b.y)
            }
        }
    };

    if replace {
        *best = Some((axis, depth));
    }
}

/// Separating axis test between two convex polygons.
///
/// Touching polygons (zero overlap on some axis) don't collide. No contact
/// point is produced.
pub fn polygon_to_polygon(first: &Polygon, second: &Polygon) -> Option<CollisionResult> {
    let first_normals = first.edge_normals();
    let second_normals = second.edge_normals();
    let offset = second.position() - first.position();

    let mut best = None;
    for &axis in first_normals.iter().chain(second_normals.iter()) {
        if axis == Vec2::zeros() {
            continue;
        }

        let (oriented, depth) = axis_penetration(
            project(first.points(), axis),
            project(second.points(), axis),
            axis,
            offset,
        );
        if depth <= 0.0 {
            return None;
        }
        keep_shallowest(&mut best, oriented, depth);
    }

    let (normal, depth) = best?;
    Some(CollisionResult::new(normal, depth))
}

/// Circle against a convex polygon, circle first.
///
/// Touching counts as a collision with a zero-length translation vector.
/// The contact point is the closest point on the polygon boundary.
pub fn circle_to_polygon(circle: &Circle, polygon: &Polygon) -> Option<CollisionResult> {
    let center = circle.position();
    let radius = circle.radius();
    let closest = closest_point_on_polygon_to_point(polygon.points(), center);

    let inside = polygon.contains_point(center);
    if !inside && closest.distance_squared > radius * radius {
        return None;
    }

    let closest_axis = if closest.distance_squared > EPSILON {
        safe_normalize(&(closest.point - center))
    } else {
        None
    };

    let normals = polygon.edge_normals();
    let offset = polygon.position() - center;

    let mut best = None;
    for axis in normals.iter().copied().chain(closest_axis) {
        if axis == Vec2::zeros() {
            continue;
        }

        let projected = center.dot(&axis);
        let (oriented, depth) = axis_penetration(
            (projected - radius, projected + radius),
            project(polygon.points(), axis),
            axis,
            offset,
        );
        keep_shallowest(&mut best, oriented, depth.max(0.0));
    }

    let (normal, depth) = best.unwrap_or_else(|| {
        trace!("circle vs polygon without usable axes, falling back to +x");
        (Vec2::x(), 0.0)
    });
    Some(CollisionResult::new(normal, depth).with_point(closest.point))
}

/// Circle pair. Touching circles don't collide.
///
/// Coincident centers resolve along +X. The contact point lies on the
/// second circle's surface, facing the first.
pub fn circle_to_circle(first: &Circle, second: &Circle) -> Option<CollisionResult> {
    let offset = second.position() - first.position();
    let distance_squared = offset.norm_squared();
    let radius_sum = first.radius() + second.radius();

    if distance_squared >= radius_sum * radius_sum {
        return None;
    }

    let normal = safe_normalize(&offset).unwrap_or_else(Vec2::x);
    let depth = radius_sum - distance_squared.sqrt();
    let point = second.position() - normal * second.radius();
    Some(CollisionResult::new(normal, depth).with_point(point))
}

/// Minkowski difference of two axis-aligned boxes
fn minkowski_difference(first: &Rect, second: &Rect) -> Rect {
    Rect::new(
        first.left() - second.right(),
        first.top() - second.bottom(),
        first.width + second.width,
        first.height + second.height,
    )
}

/// Unrotated box pair via the Minkowski difference of their bounds.
///
/// A zero translation vector (touching) is reported as no collision.
pub fn box_to_box(first: &Polygon, second: &Polygon) -> Option<CollisionResult> {
    let difference = minkowski_difference(&first.bounds(), &second.bounds());
    if !difference.contains(Vec2::zeros()) {
        return None;
    }

    let mtv = difference.closest_point_on_bounds_to_origin();
    let normal = safe_normalize(&mtv)?;
    Some(CollisionResult::new(normal, mtv.norm()))
}

/// Point inside a polygon, with the point as the first shape.
///
/// The translation vector pushes the point out through the nearest edge
/// when subtracted; the contact point is where it lands.
pub fn point_to_polygon(point: Vec2, polygon: &Polygon) -> Option<CollisionResult> {
    if !polygon.contains_point(point) {
        return None;
    }

    let closest = closest_point_on_polygon_to_point(polygon.points(), point);
    let depth = closest.distance_squared.sqrt();
    Some(CollisionResult::new(-closest.edge_normal, depth).with_point(closest.point))
}

/// Point inside an unrotated box, resolved against the nearest border
pub fn point_to_box(point: Vec2, polygon: &Polygon) -> Option<CollisionResult> {
    let bounds = polygon.bounds();
    if !bounds.contains(point) {
        return None;
    }

    let (border, edge_normal) = bounds.closest_point_on_border(point);
    let depth = (border - point).norm();
    Some(CollisionResult::new(-edge_normal, depth).with_point(border))
}

/// Point inside or on a circle, treated as a zero-radius circle.
///
/// A point at the exact center resolves along +X.
pub fn point_to_circle(point: Vec2, circle: &Circle) -> Option<CollisionResult> {
    let offset = circle.position() - point;
    let distance_squared = offset.norm_squared();
    let radius = circle.radius();

    if distance_squared > radius * radius {
        return None;
    }

    let normal = safe_normalize(&offset).unwrap_or_else(Vec2::x);
    let depth = radius - distance_squared.sqrt();
    Some(CollisionResult::new(normal, depth).with_point(circle.position() - normal * radius))
}

/// First edge of the polygon crossed by the segment `start-end`.
///
/// The nearest hit wins; on equal fractions the earlier edge is kept.
pub fn line_to_polygon(start: Vec2, end: Vec2, polygon: &Polygon) -> Option<RaycastHit> {
    let points = polygon.points();
    let winding = winding_sign(points);

    let mut nearest: Option<(f32, Vec2, usize)> = None;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        if let Some((fraction, point)) = line_to_line_parametric(start, end, points[i], points[j]) {
            if nearest.map_or(true, |(best, _, _)| fraction < best) {
                nearest = Some((fraction, point, i));
            }
        }
    }

    let (fraction, point, edge) = nearest?;
    let next = (edge + 1) % points.len();
    let normal = safe_normalize(&(perpendicular(&points[edge], &points[next]) * winding))
        .unwrap_or_else(Vec2::zeros);

    Some(RaycastHit::new(fraction, (point - start).norm(), point, normal))
}

/// First point where the segment `start-end` enters the circle.
///
/// A segment starting inside hits at fraction 0. Intersections past the
/// segment end are misses.
pub fn line_to_circle(start: Vec2, end: Vec2, circle: &Circle) -> Option<RaycastHit> {
    let center = circle.position();
    let radius = circle.radius();
    let line = end - start;
    let length = line.norm();

    let Some(direction) = safe_normalize(&line) else {
        trace!("zero-length segment against circle");
        return None;
    };

    let m = start - center;
    let b = m.dot(&direction);
    let c = m.dot(&m) - radius * radius;

    // Starts outside and points away
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = (-b - discriminant.sqrt()).max(0.0);
    if distance > length {
        return None;
    }

    let point = start + direction * distance;
    let normal = safe_normalize(&(point - center)).unwrap_or(-direction);
    Some(RaycastHit::new(distance / length, distance, point, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::physics::collision::transform::ColliderPose;
    use approx::assert_relative_eq;

    fn placed_box(width: f32, height: f32, position: Vec2) -> Polygon {
        let mut polygon = Polygon::new_box(width, height);
        polygon.recalculate_bounds(&ColliderPose::from_position(position));
        polygon
    }

    fn placed_polygon(points: &[Vec2], pose: &ColliderPose) -> Polygon {
        let mut polygon = Polygon::from_points(points);
        polygon.recalculate_bounds(pose);
        polygon
    }

    fn placed_circle(radius: f32, position: Vec2) -> Circle {
        let mut circle = Circle::new(radius);
        circle.recalculate_bounds(&ColliderPose::from_position(position));
        circle
    }

    fn triangle() -> Vec<Vec2> {
        vec![Vec2::new(0.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0)]
    }

    #[test]
    fn test_sat_overlapping_boxes() {
        let a = placed_box(2.0, 2.0, Vec2::zeros());
        let b = placed_box(2.0, 2.0, Vec2::new(1.0, 0.0));

        let result = polygon_to_polygon(&a, &b).unwrap();
        assert_relative_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(result.minimum_translation_vector, Vec2::new(1.0, 0.0));

        let moved = placed_box(2.0, 2.0, result.separation());
        assert!(polygon_to_polygon(&moved, &b).is_none());
    }

    #[test]
    fn test_sat_touching_is_not_colliding() {
        let a = placed_box(2.0, 2.0, Vec2::zeros());
        let b = placed_box(2.0, 2.0, Vec2::new(2.0, 0.0));
        assert!(polygon_to_polygon(&a, &b).is_none());
    }

    #[test]
    fn test_sat_separated_triangles() {
        let a = placed_polygon(&triangle(), &ColliderPose::identity());
        let b = placed_polygon(&triangle(), &ColliderPose::from_position(Vec2::new(5.0, 0.0)));
        assert!(polygon_to_polygon(&a, &b).is_none());
    }

    #[test]
    fn test_sat_swapped_arguments_negate() {
        let a = placed_polygon(
            &triangle(),
            &ColliderPose::from_transform(Vec2::new(0.3, 0.1), 0.4, Vec2::new(1.0, 1.0)),
        );
        let mut b = Polygon::regular(6, 1.0);
        b.recalculate_bounds(&ColliderPose::from_transform(
            Vec2::new(1.1, 0.6),
            PI / 7.0,
            Vec2::new(1.5, 1.5),
        ));

        let ab = polygon_to_polygon(&a, &b).unwrap();
        let ba = polygon_to_polygon(&b, &a).unwrap();
        assert_eq!(ab.normal, -ba.normal);
        assert_eq!(ab.minimum_translation_vector, -ba.minimum_translation_vector);
    }

    #[test]
    fn test_sat_equal_depth_tie_is_order_independent() {
        // Same overlap on X and Y
        let a = placed_box(2.0, 2.0, Vec2::zeros());
        let b = placed_polygon(
            &[
                Vec2::new(-1.0, -1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(-1.0, 1.0),
            ],
            &ColliderPose::from_position(Vec2::new(1.5, 1.5)),
        );

        let ab = polygon_to_polygon(&a, &b).unwrap();
        let ba = polygon_to_polygon(&b, &a).unwrap();
        assert_eq!(ab.normal, -ba.normal);
        assert_relative_eq!(ab.depth(), 0.5);
    }

    #[test]
    fn test_sat_nested_concentric_polygons_negate() {
        let outer = placed_box(4.0, 4.0, Vec2::zeros());
        let inner = placed_box(2.0, 2.0, Vec2::zeros());

        let ab = polygon_to_polygon(&outer, &inner).unwrap();
        let ba = polygon_to_polygon(&inner, &outer).unwrap();
        // X and Y tie on depth, the smaller canonical axis wins
        assert_relative_eq!(ab.normal, Vec2::new(0.0, 1.0));
        assert_relative_eq!(ba.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(ab.depth(), 3.0);

        let pose = ColliderPose::from_transform(Vec2::zeros(), 0.3, Vec2::new(1.0, 1.0));
        let outer = placed_polygon(Polygon::new_box(4.0, 4.0).original_points(), &pose);
        let inner = placed_polygon(Polygon::new_box(2.0, 2.0).original_points(), &pose);

        let ab = polygon_to_polygon(&outer, &inner).unwrap();
        let ba = polygon_to_polygon(&inner, &outer).unwrap();
        assert_eq!(ab.normal, -ba.normal);
        assert_eq!(ab.depth(), ba.depth());
    }

    #[test]
    fn test_box_to_box_minkowski() {
        let a = placed_box(2.0, 2.0, Vec2::zeros());
        let b = placed_box(2.0, 2.0, Vec2::new(1.0, 0.0));

        let result = box_to_box(&a, &b).unwrap();
        assert_relative_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(result.minimum_translation_vector, Vec2::new(1.0, 0.0));

        let touching = placed_box(2.0, 2.0, Vec2::new(2.0, 0.0));
        assert!(box_to_box(&a, &touching).is_none());
    }

    #[test]
    fn test_circle_to_polygon_outside_edge() {
        let polygon = placed_box(2.0, 2.0, Vec2::zeros());
        let circle = placed_circle(1.0, Vec2::new(1.5, 0.0));

        let result = circle_to_polygon(&circle, &polygon).unwrap();
        assert_relative_eq!(result.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(result.depth(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(result.point.unwrap(), Vec2::new(1.0, 0.0), epsilon = 1e-6);
        // Subtracting the translation vector pushes the circle out along +X
        assert!(result.separation().x > 0.0);
    }

    #[test]
    fn test_circle_to_polygon_center_inside() {
        let polygon = placed_box(4.0, 4.0, Vec2::zeros());
        let circle = placed_circle(0.5, Vec2::new(1.5, 0.0));

        let result = circle_to_polygon(&circle, &polygon).unwrap();
        assert_relative_eq!(result.depth(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(result.separation(), Vec2::new(1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_circle_to_polygon_touching_has_zero_mtv() {
        let polygon = placed_box(2.0, 2.0, Vec2::zeros());
        let circle = placed_circle(1.0, Vec2::new(2.0, 0.0));

        let result = circle_to_polygon(&circle, &polygon).unwrap();
        assert_relative_eq!(result.depth(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_to_polygon_miss_near_corner() {
        let polygon = placed_box(2.0, 2.0, Vec2::zeros());
        let circle = placed_circle(0.5, Vec2::new(1.5, 1.5));
        assert!(circle_to_polygon(&circle, &polygon).is_none());
    }

    #[test]
    fn test_circle_to_circle() {
        let a = placed_circle(1.0, Vec2::zeros());
        let b = placed_circle(1.0, Vec2::new(1.5, 0.0));

        let result = circle_to_circle(&a, &b).unwrap();
        assert_relative_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(result.depth(), 0.5);
        assert_relative_eq!(result.point.unwrap(), Vec2::new(0.5, 0.0));

        let far = placed_circle(1.0, Vec2::new(2.0, 0.0));
        assert!(circle_to_circle(&a, &far).is_none());
    }

    #[test]
    fn test_circle_to_circle_coincident_centers() {
        let a = placed_circle(1.0, Vec2::zeros());
        let b = placed_circle(2.0, Vec2::zeros());

        let result = circle_to_circle(&a, &b).unwrap();
        assert_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(result.depth(), 3.0);
    }

    #[test]
    fn test_point_to_polygon() {
        let polygon = placed_polygon(&triangle(), &ColliderPose::identity());
        let point = Vec2::new(0.0, 0.9);

        let result = point_to_polygon(point, &polygon).unwrap();
        assert_relative_eq!(result.depth(), 0.1, epsilon = 1e-5);
        assert_relative_eq!(result.point.unwrap(), Vec2::new(0.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(point + result.separation(), Vec2::new(0.0, 1.0), epsilon = 1e-5);

        assert!(point_to_polygon(Vec2::new(3.0, 0.0), &polygon).is_none());
    }

    #[test]
    fn test_point_to_box() {
        let polygon = placed_box(4.0, 2.0, Vec2::zeros());

        let result = point_to_box(Vec2::new(1.5, 0.0), &polygon).unwrap();
        assert_relative_eq!(result.point.unwrap(), Vec2::new(2.0, 0.0));
        assert_relative_eq!(result.separation(), Vec2::new(0.5, 0.0));

        assert!(point_to_box(Vec2::new(5.0, 0.0), &polygon).is_none());
    }

    #[test]
    fn test_point_to_circle() {
        let circle = placed_circle(2.0, Vec2::new(1.0, 1.0));

        let result = point_to_circle(Vec2::new(1.0, 2.0), &circle).unwrap();
        assert_relative_eq!(result.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(result.depth(), 1.0);
        assert_relative_eq!(result.point.unwrap(), Vec2::new(1.0, 3.0));

        assert!(point_to_circle(Vec2::new(1.0, 3.0), &circle).is_some());
        assert!(point_to_circle(Vec2::new(4.0, 1.0), &circle).is_none());
    }

    #[test]
    fn test_line_to_polygon_hits_near_face() {
        let polygon = placed_box(2.0, 2.0, Vec2::zeros());

        let hit = line_to_polygon(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), &polygon).unwrap();
        assert_relative_eq!(hit.point, Vec2::new(-1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(hit.fraction, 0.4, epsilon = 1e-6);
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-6);

        assert!(line_to_polygon(Vec2::new(-5.0, 3.0), Vec2::new(5.0, 3.0), &polygon).is_none());
    }

    #[test]
    fn test_line_to_circle() {
        let circle = placed_circle(1.0, Vec2::new(5.0, 0.0));

        let hit = line_to_circle(Vec2::zeros(), Vec2::new(10.0, 0.0), &circle).unwrap();
        assert_relative_eq!(hit.point, Vec2::new(4.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(hit.fraction, 0.4, epsilon = 1e-5);
        assert_relative_eq!(hit.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-5);

        // Too short to reach
        assert!(line_to_circle(Vec2::zeros(), Vec2::new(3.0, 0.0), &circle).is_none());
        // Pointing away
        assert!(line_to_circle(Vec2::zeros(), Vec2::new(-10.0, 0.0), &circle).is_none());
    }

    #[test]
    fn test_line_starting_inside_circle() {
        let circle = placed_circle(2.0, Vec2::zeros());

        let hit = line_to_circle(Vec2::new(0.5, 0.0), Vec2::new(10.0, 0.0), &circle).unwrap();
        assert_eq!(hit.fraction, 0.0);
        assert_eq!(hit.point, Vec2::new(0.5, 0.0));
    }
}
