//! Asteroid Splitting
//!
//! Destruction policy: an asteroid above the minimum tier breaks into
//! children one tier down, flung along the parent's heading fanned by a
//! configurable spread and sped up by an energy-redistribution factor.
//! All randomness comes from the caller's seeded RNG.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::game::body::CircleBody;
use crate::game::config::{AsteroidConfig, SplitConfig};

/// A child body waiting for an ID from the owning collection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChildSpawn {
    /// Spawn position (parent's last position)
    pub position: Vec2,
    /// Initial velocity
    pub velocity: Vec2,
    /// Collision radius from the tier table
    pub radius: f32,
    /// Tier, one below the parent
    pub tier: u8,
}

/// Compute the children produced by a destroyed asteroid.
///
/// At or below the minimum tier the asteroid is simply gone. Otherwise each
/// child inherits the parent's heading offset within the spread fan, the
/// parent's speed scaled up, and a small fraction of the destroying
/// projectile's velocity. With jitter disabled children take exact
/// `+/- spread/2` headings and the undithered speed scale.
pub fn spawn_children(
    parent: &CircleBody,
    projectile_velocity: Option<Vec2>,
    split: &SplitConfig,
    asteroid: &AsteroidConfig,
    rng: &mut GameRng,
) -> Vec<ChildSpawn> {
    if parent.tier <= split.min_tier {
        return Vec::new();
    }

    let child_tier = parent.tier - 1;
    let child_radius = asteroid.radius_for_tier(child_tier);

    let base_speed = parent.velocity.length() * split.speed_scale;
    let base_heading = parent.velocity.heading();

    let mut children = Vec::with_capacity(split.children as usize);
    for i in 0..split.children {
        let (offset, speed) = if split.jitter {
            (
                rng.next_range(-split.spread, split.spread),
                base_speed * rng.next_range(1.0 - split.speed_jitter, 1.0 + split.speed_jitter),
            )
        } else {
            // Alternate the fan sides so two children separate cleanly
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            (sign * split.spread * 0.5, base_speed)
        };

        let mut velocity = Vec2::from_heading(base_heading + offset) * speed;
        if let Some(pv) = projectile_velocity {
            velocity += pv * split.projectile_coupling;
        }

        children.push(ChildSpawn {
            position: parent.position,
            velocity,
            radius: child_radius,
            tier: child_tier,
        });
    }

    children
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::body::BodyId;

    fn parent(tier: u8, velocity: Vec2) -> CircleBody {
        CircleBody::new(BodyId(7), Vec2::new(400.0, 300.0), velocity, 30.0, tier)
    }

    fn configs() -> (SplitConfig, AsteroidConfig) {
        (SplitConfig::default(), AsteroidConfig::default())
    }

    #[test]
    fn test_split_conservation() {
        let (split, asteroid) = configs();
        let mut rng = GameRng::new(42);

        // Tier 3 yields exactly 2 children of tier 2 with non-zero radius
        let children = spawn_children(
            &parent(3, Vec2::new(50.0, 0.0)),
            None,
            &split,
            &asteroid,
            &mut rng,
        );
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.tier, 2);
            assert!(child.radius > 0.0);
            assert_eq!(child.position, Vec2::new(400.0, 300.0));
        }

        // Minimum tier yields nothing
        let children = spawn_children(
            &parent(1, Vec2::new(50.0, 0.0)),
            None,
            &split,
            &asteroid,
            &mut rng,
        );
        assert!(children.is_empty());
    }

    #[test]
    fn test_split_deterministic_for_seed() {
        let (split, asteroid) = configs();
        let p = parent(4, Vec2::new(30.0, -40.0));

        let mut rng1 = GameRng::new(99);
        let mut rng2 = GameRng::new(99);
        let a = spawn_children(&p, None, &split, &asteroid, &mut rng1);
        let b = spawn_children(&p, None, &split, &asteroid, &mut rng2);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.velocity, y.velocity);
        }
    }

    #[test]
    fn test_split_without_jitter_is_exact() {
        let (mut split, asteroid) = configs();
        split.jitter = false;
        let mut rng = GameRng::new(0);

        // Parent heading straight right at 100 units/sec
        let children = spawn_children(
            &parent(3, Vec2::new(100.0, 0.0)),
            None,
            &split,
            &asteroid,
            &mut rng,
        );

        let expected_speed = 130.0;
        let half_spread = split.spread * 0.5;
        let expected = [
            Vec2::from_heading(half_spread) * expected_speed,
            Vec2::from_heading(-half_spread) * expected_speed,
        ];

        for (child, want) in children.iter().zip(expected) {
            assert!((child.velocity.x - want.x).abs() < 1e-3);
            assert!((child.velocity.y - want.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_split_couples_projectile_velocity() {
        let (mut split, asteroid) = configs();
        split.jitter = false;
        let mut rng = GameRng::new(0);
        let p = parent(3, Vec2::new(100.0, 0.0));

        let plain = spawn_children(&p, None, &split, &asteroid, &mut rng);
        let coupled = spawn_children(
            &p,
            Some(Vec2::new(600.0, 0.0)),
            &split,
            &asteroid,
            &mut rng,
        );

        // 5% of the projectile velocity rides along
        for (a, b) in plain.iter().zip(&coupled) {
            assert!((b.velocity.x - a.velocity.x - 30.0).abs() < 1e-3);
            assert!((b.velocity.y - a.velocity.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_child_radius_follows_tier_table() {
        let (mut split, asteroid) = configs();
        split.jitter = false;
        let mut rng = GameRng::new(0);

        let children = spawn_children(
            &parent(5, Vec2::new(10.0, 10.0)),
            None,
            &split,
            &asteroid,
            &mut rng,
        );
        assert_eq!(children[0].radius, asteroid.radius_for_tier(4));
    }
}
