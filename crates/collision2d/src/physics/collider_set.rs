//! Collider arena
//!
//! [`ColliderSet`] owns shapes together with the transform state they
//! follow, and answers queries across all of them. There is no broad
//! phase: whole-set queries scan every collider and reject on bounds first.

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::config::CollisionConfig;
use crate::foundation::math::Vec2;
use crate::physics::collision::primitives::rect_to_line;
use crate::physics::collision::{
    ColliderPose, CollisionError, CollisionResult, RaycastHit, Rect, Shape,
};
use crate::physics::collision_layers::CollisionLayers;

new_key_type! {
    /// Handle to a collider in a [`ColliderSet`]
    pub struct ColliderId;
}

/// A shape plus the transform and layer it was registered with
#[derive(Debug, Clone)]
pub struct ColliderEntry {
    shape: Shape,
    pose: ColliderPose,
    layer: u32,
}

impl ColliderEntry {
    /// World-space shape, current as of the last transform update
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Transform the shape follows
    pub fn pose(&self) -> &ColliderPose {
        &self.pose
    }

    /// Layer bits
    pub fn layer(&self) -> u32 {
        self.layer
    }

    fn refresh(&mut self) {
        self.shape.recalculate_bounds(&self.pose);
        self.pose.clear_rotation_dirty();
    }
}

/// Arena of colliders with whole-set queries
#[derive(Debug, Default)]
pub struct ColliderSet {
    colliders: SlotMap<ColliderId, ColliderEntry>,
    config: CollisionConfig,
}

impl ColliderSet {
    /// Create an empty set with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with the given configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Register a collider. Its world geometry is computed immediately.
    pub fn insert(&mut self, shape: Shape, pose: ColliderPose, layer: u32) -> ColliderId {
        let mut entry = ColliderEntry { shape, pose, layer };
        entry.refresh();

        let kind = entry.shape.kind();
        let bounds = entry.shape.bounds();
        let id = self.colliders.insert(entry);
        debug!("inserted {} collider {:?} on layer {:#x}, bounds {:?}", kind, id, layer, bounds);
        id
    }

    /// Unregister a collider, returning it if it was present
    pub fn remove(&mut self, id: ColliderId) -> Option<ColliderEntry> {
        let removed = self.colliders.remove(id);
        if removed.is_some() {
            debug!("removed collider {:?}", id);
        }
        removed
    }

    /// Look up a collider
    pub fn get(&self, id: ColliderId) -> Option<&ColliderEntry> {
        self.colliders.get(id)
    }

    /// World-space shape of a collider
    pub fn shape(&self, id: ColliderId) -> Option<&Shape> {
        self.colliders.get(id).map(|entry| &entry.shape)
    }

    /// World bounds of a collider
    pub fn bounds(&self, id: ColliderId) -> Option<Rect> {
        self.colliders.get(id).map(|entry| entry.shape.bounds())
    }

    /// Check if `id` names a live collider
    pub fn contains(&self, id: ColliderId) -> bool {
        self.colliders.contains_key(id)
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate over all colliders
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &ColliderEntry)> {
        self.colliders.iter()
    }

    /// Remove every collider
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Move, rotate and scale a collider, then refresh its world geometry
    pub fn set_transform(
        &mut self,
        id: ColliderId,
        position: Vec2,
        rotation: f32,
        scale: Vec2,
    ) -> Result<(), CollisionError> {
        let entry = self.entry_mut(id)?;
        entry.pose.position = position;
        entry.pose.set_rotation(rotation);
        entry.pose.scale = scale;
        entry.refresh();

        trace!("collider {:?} moved, bounds {:?}", id, entry.shape.bounds());
        Ok(())
    }

    /// Change the offset of a collider's shape from its position
    pub fn set_local_offset(&mut self, id: ColliderId, offset: Vec2) -> Result<(), CollisionError> {
        let entry = self.entry_mut(id)?;
        entry.pose.local_offset = offset;
        entry.refresh();
        Ok(())
    }

    /// Full collision test between two colliders, from `a`'s point of view
    pub fn collide(
        &self,
        a: ColliderId,
        b: ColliderId,
    ) -> Result<Option<CollisionResult>, CollisionError> {
        let (first, second) = (self.entry(a)?, self.entry(b)?);
        Ok(first.shape.collides_with_shape(&second.shape))
    }

    /// Cheap overlap test between two colliders
    pub fn overlaps(&self, a: ColliderId, b: ColliderId) -> Result<bool, CollisionError> {
        let (first, second) = (self.entry(a)?, self.entry(b)?);
        Ok(first.shape.overlaps(&second.shape))
    }

    /// Nearest hit of the segment `start-end` among colliders on `layer_mask`.
    ///
    /// Unless the config allows it, colliders containing `start` are
    /// skipped. Equal fractions keep the first collider in iteration order.
    pub fn linecast(&self, start: Vec2, end: Vec2, layer_mask: u32) -> Option<RaycastHit> {
        let mut nearest: Option<RaycastHit> = None;
        let mut candidates = 0;

        for (id, entry) in &self.colliders {
            if !CollisionLayers::in_mask(entry.layer, layer_mask) {
                continue;
            }
            if !rect_to_line(&entry.shape.bounds(), start, end) {
                continue;
            }
            if !self.config.raycasts_start_in_colliders && entry.shape.contains_point(start) {
                continue;
            }

            candidates += 1;
            if let Some(hit) = entry.shape.collides_with_line(start, end) {
                if nearest.map_or(true, |best| hit.fraction < best.fraction) {
                    nearest = Some(hit.with_collider(id));
                }
            }
        }

        trace!(
            "linecast {:?} -> {:?}: {} candidates, hit {:?}",
            start,
            end,
            candidates,
            nearest.and_then(|hit| hit.collider)
        );
        nearest
    }

    /// [`ColliderSet::linecast`] with the configured default layer mask
    pub fn linecast_all_layers(&self, start: Vec2, end: Vec2) -> Option<RaycastHit> {
        self.linecast(start, end, self.config.default_layer_mask)
    }

    /// First collider on `layer_mask` containing `point`
    pub fn overlap_point(&self, point: Vec2, layer_mask: u32) -> Option<ColliderId> {
        self.colliders
            .iter()
            .filter(|(_, entry)| CollisionLayers::in_mask(entry.layer, layer_mask))
            .find(|(_, entry)| entry.shape.contains_point(point))
            .map(|(id, _)| id)
    }

    fn entry(&self, id: ColliderId) -> Result<&ColliderEntry, CollisionError> {
        self.colliders.get(id).ok_or(CollisionError::UnknownCollider(id))
    }

    fn entry_mut(&mut self, id: ColliderId) -> Result<&mut ColliderEntry, CollisionError> {
        self.colliders.get_mut(id).ok_or(CollisionError::UnknownCollider(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::physics::collision::ColliderTransform;
    use approx::assert_relative_eq;

    fn create_test_set() -> (ColliderSet, ColliderId, ColliderId) {
        let mut set = ColliderSet::new();
        let a = set.insert(
            Shape::new_box(2.0, 2.0),
            ColliderPose::identity(),
            CollisionLayers::PLAYER,
        );
        let b = set.insert(
            Shape::new_box(2.0, 2.0),
            ColliderPose::from_position(Vec2::new(1.0, 0.0)),
            CollisionLayers::ENEMY,
        );
        (set, a, b)
    }

    #[test]
    fn test_insert_computes_bounds() {
        let (set, _, b) = create_test_set();
        assert_eq!(set.len(), 2);
        assert_relative_eq!(set.bounds(b).unwrap(), Rect::new(0.0, -1.0, 2.0, 2.0));
        assert!(!set.get(b).unwrap().pose().is_rotation_dirty());
    }

    #[test]
    fn test_collide_and_overlaps() {
        let (set, a, b) = create_test_set();

        let result = set.collide(a, b).unwrap().unwrap();
        assert_relative_eq!(result.minimum_translation_vector, Vec2::new(1.0, 0.0));
        assert!(set.overlaps(a, b).unwrap());
    }

    #[test]
    fn test_unknown_collider() {
        let (mut set, a, b) = create_test_set();
        assert!(set.remove(b).is_some());
        assert!(set.remove(b).is_none());

        assert_eq!(set.collide(a, b), Err(CollisionError::UnknownCollider(b)));
        assert_eq!(
            set.set_transform(b, Vec2::zeros(), 0.0, Vec2::new(1.0, 1.0)),
            Err(CollisionError::UnknownCollider(b))
        );
        assert!(set.shape(b).is_none());
    }

    #[test]
    fn test_set_transform_updates_geometry() {
        let (mut set, a, b) = create_test_set();
        set.set_transform(b, Vec2::new(10.0, 0.0), 0.0, Vec2::new(1.0, 1.0))
            .unwrap();
        assert!(!set.overlaps(a, b).unwrap());

        set.set_transform(a, Vec2::new(10.0, 1.5), HALF_PI, Vec2::new(1.0, 1.0))
            .unwrap();
        assert!(set.overlaps(a, b).unwrap());
        assert!(!set.get(a).unwrap().pose().is_rotation_dirty());
    }

    #[test]
    fn test_linecast_returns_nearest() {
        let mut set = ColliderSet::new();
        let near = set.insert(
            Shape::new_box(2.0, 2.0),
            ColliderPose::from_position(Vec2::new(5.0, 0.0)),
            CollisionLayers::ENVIRONMENT,
        );
        let far = set.insert(
            Shape::circle(1.0),
            ColliderPose::from_position(Vec2::new(10.0, 0.0)),
            CollisionLayers::ENEMY,
        );

        let hit = set.linecast(Vec2::zeros(), Vec2::new(20.0, 0.0), CollisionLayers::ALL).unwrap();
        assert_eq!(hit.collider, Some(near));
        assert_relative_eq!(hit.point, Vec2::new(4.0, 0.0), epsilon = 1e-5);

        let hit = set
            .linecast(Vec2::zeros(), Vec2::new(20.0, 0.0), CollisionLayers::ENEMY)
            .unwrap();
        assert_eq!(hit.collider, Some(far));
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-4);

        assert!(set.linecast(Vec2::zeros(), Vec2::new(20.0, 0.0), CollisionLayers::NONE).is_none());
    }

    #[test]
    fn test_linecast_skips_collider_containing_start() {
        let mut set = ColliderSet::new();
        set.insert(Shape::circle(2.0), ColliderPose::identity(), CollisionLayers::ALL);

        assert!(set.linecast_all_layers(Vec2::zeros(), Vec2::new(5.0, 0.0)).is_none());

        let mut set = ColliderSet::with_config(CollisionConfig {
            raycasts_start_in_colliders: true,
            ..Default::default()
        });
        let inside = set.insert(Shape::circle(2.0), ColliderPose::identity(), CollisionLayers::ALL);
        let hit = set.linecast_all_layers(Vec2::zeros(), Vec2::new(5.0, 0.0)).unwrap();
        assert_eq!(hit.collider, Some(inside));
        assert_eq!(hit.fraction, 0.0);
    }

    #[test]
    fn test_overlap_point() {
        let (set, a, b) = create_test_set();

        assert_eq!(set.overlap_point(Vec2::new(-0.5, 0.0), CollisionLayers::ALL), Some(a));
        assert_eq!(set.overlap_point(Vec2::new(1.5, 0.0), CollisionLayers::ALL), Some(b));
        assert_eq!(set.overlap_point(Vec2::new(0.5, 0.0), CollisionLayers::ENEMY), Some(b));
        assert_eq!(set.overlap_point(Vec2::new(5.0, 0.0), CollisionLayers::ALL), None);
    }
}
