//! Convex polygon shape
//!
//! A polygon keeps an immutable local-space template (`original_points`)
//! and a world-space cache (`points`) of the same length that is rewritten
//! in place by [`Polygon::recalculate_bounds`]. Edge normals are derived
//! lazily from the world cache and rebuilt on first read after the
//! template, rotation or scale changes.
//!
//! Winding: points are expected clockwise in screen space (Y down), which is
//! a positive shoelace sum. Edge normals are computed as `(dy, -dx)` and
//! flipped for the opposite winding, so they always face outward.

use std::cell::{Ref, RefCell};

use log::trace;

use super::rect::Rect;
use super::transform::ColliderTransform;
use super::ShapeError;
use crate::foundation::math::{
    constants::TAU,
    utils::{cross, perpendicular, point_on_circle, rad_to_deg, safe_normalize},
    Mat3, Point2, Vec2,
};
use crate::physics::collision::primitives::closest_point_on_line;

/// Lazily rebuilt edge normals
#[derive(Debug, Clone, Default)]
struct EdgeNormalCache {
    normals: Vec<Vec2>,
    dirty: bool,
}

/// Convex polygon (or box) collision shape
#[derive(Debug, Clone)]
pub struct Polygon {
    original_points: Vec<Vec2>,
    points: Vec<Vec2>,
    polygon_center: Vec2,
    edge_normals: RefCell<EdgeNormalCache>,
    is_box: bool,
    is_unrotated: bool,
    position: Vec2,
    center: Vec2,
    bounds: Rect,
    applied_rotation: f32,
    applied_scale: Vec2,
    template_changed: bool,
}

impl Polygon {
    /// Create a polygon from clockwise, convex points roughly centered on the origin.
    ///
    /// # Panics
    /// Panics if fewer than 3 points are given. Use [`Polygon::try_from_points`]
    /// for data that hasn't been validated.
    pub fn from_points(points: &[Vec2]) -> Self {
        assert!(
            points.len() >= 3,
            "a polygon needs at least 3 points, got {}",
            points.len()
        );
        Self::with_template(points, false)
    }

    /// Validating version of [`Polygon::from_points`]
    pub fn try_from_points(points: &[Vec2]) -> Result<Self, ShapeError> {
        validate_points(points)?;
        Ok(Self::with_template(points, false))
    }

    /// Create a regular polygon: `vertex_count` points evenly spaced on a
    /// circle of `radius`, vertex `i` at angle `i * TAU / vertex_count`.
    ///
    /// # Panics
    /// Panics if `vertex_count < 3`.
    pub fn regular(vertex_count: usize, radius: f32) -> Self {
        Self::from_points(&build_regular_polygon(vertex_count, radius))
    }

    /// Validating version of [`Polygon::regular`]
    pub fn try_regular(vertex_count: usize, radius: f32) -> Result<Self, ShapeError> {
        if vertex_count < 3 {
            return Err(ShapeError::TooFewVertices(vertex_count));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Self::try_from_points(&build_regular_polygon(vertex_count, radius))
    }

    /// Create a `width` x `height` box centered on the origin
    pub fn new_box(width: f32, height: f32) -> Self {
        Self::with_template(&build_box(width, height), true)
    }

    /// Validating version of [`Polygon::new_box`]
    pub fn try_new_box(width: f32, height: f32) -> Result<Self, ShapeError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ShapeError::InvalidBoxSize { width, height });
        }
        Ok(Self::new_box(width, height))
    }

    fn with_template(points: &[Vec2], is_box: bool) -> Self {
        let original_points = points.to_vec();
        let bounds = Rect::encompassing_points(&original_points);
        Self {
            points: original_points.clone(),
            polygon_center: find_centroid(&original_points),
            original_points,
            edge_normals: RefCell::new(EdgeNormalCache {
                normals: Vec::with_capacity(points.len()),
                dirty: true,
            }),
            is_box,
            is_unrotated: true,
            position: Vec2::zeros(),
            center: Vec2::zeros(),
            bounds,
            applied_rotation: 0.0,
            applied_scale: Vec2::new(1.0, 1.0),
            template_changed: false,
        }
    }

    /// Replace the local-space template.
    ///
    /// Call when the logical shape changes, not on transform updates. The
    /// world cache is reset to the new template at the current position;
    /// call [`Polygon::recalculate_bounds`] to reapply scale and rotation.
    ///
    /// # Panics
    /// Panics if fewer than 3 points are given.
    pub fn set_points(&mut self, points: &[Vec2]) {
        assert!(
            points.len() >= 3,
            "a polygon needs at least 3 points, got {}",
            points.len()
        );

        self.original_points.clear();
        self.original_points.extend_from_slice(points);
        self.polygon_center = find_centroid(&self.original_points);

        let position = self.position;
        self.points.clear();
        self.points
            .extend(self.original_points.iter().map(|p| p + position));
        self.bounds = Rect::encompassing_points(&self.points);
        // Next recompute rebuilds normals whatever the pose
        self.template_changed = true;
        self.invalidate_edge_normals();
    }

    /// Resize a box. The polygon stays a box.
    pub fn update_box(&mut self, width: f32, height: f32) {
        self.is_box = true;
        self.set_points(&build_box(width, height));
    }

    /// Local-space template
    pub fn original_points(&self) -> &[Vec2] {
        &self.original_points
    }

    /// World-space points, as of the last bounds recompute
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Centroid of the template
    pub fn polygon_center(&self) -> Vec2 {
        self.polygon_center
    }

    /// World reference point: owner position plus [`Polygon::center`]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Offset of the shape from its owner, after scale and rotation
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Axis-aligned box enclosing the world points
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether this polygon is a rectangle (two edge normals)
    pub fn is_box(&self) -> bool {
        self.is_box
    }

    /// Whether the owner's rotation was exactly zero at the last recompute
    pub fn is_unrotated(&self) -> bool {
        self.is_unrotated
    }

    fn invalidate_edge_normals(&mut self) {
        self.edge_normals.get_mut().dirty = true;
    }

    /// Outward unit normal of every edge; only the first two edges for a box.
    ///
    /// Rebuilt on demand when stale. The returned guard borrows the cache,
    /// so drop it before mutating the polygon.
    pub fn edge_normals(&self) -> Ref<'_, [Vec2]> {
        if self.edge_normals.borrow().dirty {
            let mut cache = self.edge_normals.borrow_mut();
            build_edge_normals(&self.points, self.is_box, &mut cache.normals);
            cache.dirty = false;
            trace!("rebuilt {} edge normals", cache.normals.len());
        }

        Ref::map(self.edge_normals.borrow(), |cache| cache.normals.as_slice())
    }

    /// Refresh world points, position and bounds from the owner's transform.
    ///
    /// With the owner's scale and rotation followed, the template is scaled
    /// and rotated about its own centroid, and the local offset orbits the
    /// owner position as it rotates.
    pub fn recalculate_bounds<T: ColliderTransform + ?Sized>(&mut self, transform: &T) {
        debug_assert_eq!(self.points.len(), self.original_points.len());

        let local_offset = transform.local_offset();
        let mut center = local_offset;

        let (rotation, scale) = if transform.follows_transform() {
            (transform.rotation(), transform.scale())
        } else {
            (0.0, Vec2::new(1.0, 1.0))
        };
        let has_unit_scale = scale == Vec2::new(1.0, 1.0);

        let combined = if has_unit_scale && rotation == 0.0 {
            None
        } else {
            let mut matrix = Mat3::new_translation(&-self.polygon_center);

            if !has_unit_scale {
                matrix = Mat3::new_nonuniform_scaling(&scale) * matrix;
                center = local_offset.component_mul(&scale);
            }

            if rotation != 0.0 {
                matrix = Mat3::new_rotation(rotation) * matrix;

                let scaled_offset = local_offset.component_mul(&scale);
                let offset_angle = rad_to_deg(scaled_offset.y.atan2(scaled_offset.x));
                let offset_length = if has_unit_scale {
                    local_offset.norm()
                } else {
                    scaled_offset.norm()
                };
                center = point_on_circle(
                    &Vec2::zeros(),
                    offset_length,
                    transform.rotation_degrees() + offset_angle,
                );
            }

            Some(Mat3::new_translation(&self.polygon_center) * matrix)
        };

        let position = transform.position() + center;
        match combined {
            Some(matrix) => {
                for (dst, src) in self.points.iter_mut().zip(&self.original_points) {
                    *dst = matrix.transform_point(&Point2::from(*src)).coords + position;
                }
            }
            None => {
                for (dst, src) in self.points.iter_mut().zip(&self.original_points) {
                    *dst = src + position;
                }
            }
        }

        if self.template_changed
            || transform.is_rotation_dirty()
            || rotation != self.applied_rotation
            || scale != self.applied_scale
        {
            self.invalidate_edge_normals();
        }

        self.is_unrotated = rotation == 0.0;
        self.template_changed = false;
        self.applied_rotation = rotation;
        self.applied_scale = scale;
        self.center = center;
        self.position = position;
        self.bounds = Rect::encompassing_points(&self.points);
    }

    /// Point-in-polygon test against the world points.
    ///
    /// Unrotated boxes use their bounds directly. On a rectangle both paths
    /// are half-open: points on the left or top edge are inside, points on
    /// the right or bottom edge are not.
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.is_box && self.is_unrotated {
            return self.bounds.contains(point);
        }
        point_in_polygon(&self.points, point)
    }
}

fn validate_points(points: &[Vec2]) -> Result<(), ShapeError> {
    if points.len() < 3 {
        return Err(ShapeError::TooFewPoints(points.len()));
    }
    if let Some(index) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(ShapeError::NonFinitePoint(index));
    }
    Ok(())
}

fn build_regular_polygon(vertex_count: usize, radius: f32) -> Vec<Vec2> {
    let step = TAU / vertex_count as f32;
    (0..vertex_count)
        .map(|i| {
            let angle = step * i as f32;
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

fn build_box(width: f32, height: f32) -> Vec<Vec2> {
    let mut points = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ];
    recenter_in_place(&mut points);
    points
}

/// Twice the signed area; positive for clockwise screen-space winding
fn signed_area_x2(points: &[Vec2]) -> f32 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| cross(a, b))
        .sum()
}

/// +1 when `(dy, -dx)` edge perpendiculars face outward, -1 otherwise
pub(crate) fn winding_sign(points: &[Vec2]) -> f32 {
    if signed_area_x2(points) < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn build_edge_normals(points: &[Vec2], is_box: bool, normals: &mut Vec<Vec2>) {
    let total_edges = if is_box { 2 } else { points.len() };
    let winding = winding_sign(points);

    normals.clear();
    for i in 0..total_edges {
        let first = points[i];
        let second = points[(i + 1) % points.len()];
        let perp = perpendicular(&first, &second) * winding;
        // Repeated vertices give a zero normal, which the narrow phase skips
        normals.push(safe_normalize(&perp).unwrap_or_else(Vec2::zeros));
    }
}

/// Arithmetic mean of the points. Only the true center for regular polygons.
pub fn find_centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::zeros();
    }
    let sum: Vec2 = points.iter().sum();
    sum / points.len() as f32
}

/// Shift the points so their centroid sits on the origin
pub fn recenter_in_place(points: &mut [Vec2]) {
    let center = find_centroid(points);
    for p in points.iter_mut() {
        *p -= center;
    }
}

/// Point with the largest projection onto `direction` (first one on ties)
pub fn farthest_point_in_direction(points: &[Vec2], direction: Vec2) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;
    for p in points {
        let dot = p.dot(&direction);
        match best {
            Some((best_dot, _)) if dot <= best_dot => {}
            _ => best = Some((dot, *p)),
        }
    }
    best.map(|(_, p)| p)
}

/// Closest point on a polygon boundary to a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Closest point on the boundary
    pub point: Vec2,
    /// Squared distance from the query point
    pub distance_squared: f32,
    /// Outward unit normal of the edge holding `point`
    pub edge_normal: Vec2,
}

/// Closest point on the polygon boundary (not interior) to `point`.
///
/// Ties keep the earlier edge. The winning edge's normal is normalized once
/// at the end.
pub fn closest_point_on_polygon_to_point(points: &[Vec2], point: Vec2) -> ClosestPoint {
    let mut distance_squared = f32::MAX;
    let mut edge_normal = Vec2::zeros();
    let mut closest_point = Vec2::zeros();

    for i in 0..points.len() {
        let j = if i + 1 == points.len() { 0 } else { i + 1 };

        let closest = closest_point_on_line(points[i], points[j], point);
        let temp_distance_squared = (point - closest).norm_squared();

        if temp_distance_squared < distance_squared {
            distance_squared = temp_distance_squared;
            closest_point = closest;
            edge_normal = perpendicular(&points[i], &points[j]);
        }
    }

    let edge_normal =
        safe_normalize(&(edge_normal * winding_sign(points))).unwrap_or_else(Vec2::zeros);

    ClosestPoint {
        point: closest_point,
        distance_squared,
        edge_normal,
    }
}

/// Even-odd crossing test, casting toward +X from `point`
pub fn point_in_polygon(points: &[Vec2], point: Vec2) -> bool {
    let mut is_inside = false;
    let mut j = points.len().wrapping_sub(1);

    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        // Straddling edges have distinct Y, so the division is safe
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            is_inside = !is_inside;
        }
        j = i;
    }

    is_inside
}
