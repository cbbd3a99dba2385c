//! Collision layer filtering
//!
//! Every collider sits on one or more layer bits. Queries take a mask of
//! the layers they care about; pair tests require each side's layer to be
//! in the other's mask.

/// Collision layer bits and mask helpers
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Player character layer
    pub const PLAYER: u32 = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static environment geometry
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Trigger volumes (no physical response)
    pub const TRIGGER: u32 = 1 << 4;

    /// Check if two colliders should collide based on their layers and masks
    ///
    /// # Example
    /// ```
    /// use collision2d::physics::CollisionLayers;
    ///
    /// let player_mask = CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT;
    /// let enemy_mask = CollisionLayers::PLAYER | CollisionLayers::PROJECTILE;
    ///
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER, player_mask,
    ///     CollisionLayers::ENEMY, enemy_mask,
    /// ));
    /// ```
    pub fn should_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        Self::in_mask(layer_a, mask_b) && Self::in_mask(layer_b, mask_a)
    }

    /// Check if any of `layer`'s bits are selected by `mask`
    pub fn in_mask(layer: u32, mask: u32) -> bool {
        layer & mask != 0
    }

    /// Helper to create a mask from multiple layers
    ///
    /// # Example
    /// ```
    /// use collision2d::physics::CollisionLayers;
    ///
    /// let mask = CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::ENEMY]);
    /// assert_eq!(mask, 0b11);
    /// ```
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(Self::NONE, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        // Player wants the enemy, but the enemy only wants projectiles
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PROJECTILE
        ));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionLayers::mask(&[
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENVIRONMENT,
        ]);

        assert_eq!(
            mask,
            CollisionLayers::PLAYER | CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT
        );
        assert_eq!(CollisionLayers::mask(&[]), CollisionLayers::NONE);
    }

    #[test]
    fn test_in_mask() {
        assert!(CollisionLayers::in_mask(CollisionLayers::TRIGGER, CollisionLayers::ALL));
        assert!(!CollisionLayers::in_mask(CollisionLayers::TRIGGER, CollisionLayers::NONE));
        assert!(!CollisionLayers::in_mask(CollisionLayers::NONE, CollisionLayers::ALL));
    }
}
