//! Collision Detection
//!
//! Exhaustive pair scan over the active bodies each tick. The scan itself is
//! read-only and produces plain outcome records; mutation (deactivation,
//! splitting, bouncing) happens in a separate apply pass so the collections
//! are never edited mid-iteration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::body::{BodyId, CircleBody};
use crate::game::boss::{circle_intersects_polygon, point_in_polygon, Boss};
use crate::game::space::ToroidalSpace;

/// Positional slop added when separating an overlapping pair, so a resolved
/// pair measures strictly apart on the next scan.
const SEPARATION_SKIN: f32 = 0.01;

/// Response applied when two asteroids overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceResponse {
    /// Equal-mass elastic exchange of normal velocity components
    ElasticSwap,
    /// Detect and report, but leave velocities alone
    Ignore,
}

/// A collision found during the read-only scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Bullet struck an asteroid; both are spent
    ProjectileStruckAsteroid {
        /// The bullet
        bullet: BodyId,
        /// The asteroid
        asteroid: BodyId,
    },
    /// Ship overlapped an asteroid
    ShipStruckAsteroid {
        /// The asteroid
        asteroid: BodyId,
    },
    /// Two asteroids overlapped
    AsteroidsCollided {
        /// First participant (lower index in the scan)
        a: BodyId,
        /// Second participant
        b: BodyId,
    },
    /// Bullet landed inside the boss hitbox
    ProjectileStruckBoss {
        /// The bullet
        bullet: BodyId,
    },
    /// Ship touched the boss hitbox
    ShipStruckBoss,
}

/// Check whether two circles overlap on the torus.
#[inline]
pub fn circles_overlap(
    space: &ToroidalSpace,
    pos_a: Vec2,
    radius_a: f32,
    pos_b: Vec2,
    radius_b: f32,
) -> bool {
    space.wrapped_distance(pos_a, pos_b) < radius_a + radius_b
}

/// Scan all active pairs once and report every collision.
///
/// Sub-pass order is fixed: bullets vs asteroids, ship vs asteroids,
/// asteroid pairs, bullets vs boss, ship vs boss. A body consumed by an
/// earlier sub-pass is claimed and skipped by later ones, so nothing is
/// double-processed within a tick. Inactive and degenerate-radius bodies are
/// skipped as a precondition, never an error; empty collections scan to an
/// empty result.
pub fn detect(
    space: &ToroidalSpace,
    ship: &CircleBody,
    asteroids: &[CircleBody],
    bullets: &[CircleBody],
    boss: Option<&Boss>,
) -> Vec<CollisionOutcome> {
    let mut outcomes = Vec::new();
    let mut claimed: BTreeSet<BodyId> = BTreeSet::new();

    // Bullet vs asteroid: each bullet spends itself on at most one asteroid
    for bullet in bullets.iter().filter(|b| b.can_collide()) {
        for asteroid in asteroids.iter().filter(|a| a.can_collide()) {
            if claimed.contains(&asteroid.id) {
                continue;
            }
            if circles_overlap(
                space,
                bullet.position,
                bullet.radius,
                asteroid.position,
                asteroid.radius,
            ) {
                outcomes.push(CollisionOutcome::ProjectileStruckAsteroid {
                    bullet: bullet.id,
                    asteroid: asteroid.id,
                });
                claimed.insert(bullet.id);
                claimed.insert(asteroid.id);
                break;
            }
        }
    }

    // Ship vs asteroid: first surviving overlap this tick
    if ship.can_collide() {
        for asteroid in asteroids.iter().filter(|a| a.can_collide()) {
            if claimed.contains(&asteroid.id) {
                continue;
            }
            if circles_overlap(
                space,
                ship.position,
                ship.radius,
                asteroid.position,
                asteroid.radius,
            ) {
                outcomes.push(CollisionOutcome::ShipStruckAsteroid {
                    asteroid: asteroid.id,
                });
                claimed.insert(asteroid.id);
                break;
            }
        }
    }

    // Asteroid vs asteroid: every unordered pair exactly once
    for i in 0..asteroids.len() {
        let a = &asteroids[i];
        if !a.can_collide() || claimed.contains(&a.id) {
            continue;
        }
        for b in asteroids.iter().skip(i + 1) {
            if !b.can_collide() || claimed.contains(&b.id) {
                continue;
            }
            if circles_overlap(space, a.position, a.radius, b.position, b.radius) {
                outcomes.push(CollisionOutcome::AsteroidsCollided { a: a.id, b: b.id });
            }
        }
    }

    // Boss hitbox: bullets need containment, the ship also gets edge
    // proximity so a grazing pass still registers
    if let Some(boss) = boss.filter(|b| b.alive && !b.hitbox.is_degenerate()) {
        let vertices = boss.world_vertices();

        for bullet in bullets.iter().filter(|b| b.can_collide()) {
            if claimed.contains(&bullet.id) {
                continue;
            }
            if point_in_polygon(&vertices, bullet.position) {
                outcomes.push(CollisionOutcome::ProjectileStruckBoss { bullet: bullet.id });
                claimed.insert(bullet.id);
            }
        }

        if ship.can_collide() && circle_intersects_polygon(&vertices, ship.position, ship.radius) {
            outcomes.push(CollisionOutcome::ShipStruckBoss);
        }
    }

    outcomes
}

/// Apply the equal-mass elastic response to an overlapping pair.
///
/// Exchanges the velocity components along the contact normal (computed from
/// the wrapped delta) and nudges both bodies apart along that normal until
/// they are separated. The positional correction is what prevents a
/// touching-but-not-separating pair from re-colliding forever.
pub fn resolve_elastic(space: &ToroidalSpace, a: &mut CircleBody, b: &mut CircleBody) {
    let delta = space.wrapped_delta(a.position, b.position);
    let distance = delta.length();

    // Coincident centers get an arbitrary but deterministic normal
    let normal = if distance > f32::EPSILON {
        delta.scale(1.0 / distance)
    } else {
        Vec2::RIGHT
    };

    // Equal-mass elastic collision: swap normal components, keep tangents
    let a_normal = a.velocity.dot(normal);
    let b_normal = b.velocity.dot(normal);
    a.velocity += normal * (b_normal - a_normal);
    b.velocity += normal * (a_normal - b_normal);

    // Minimum-separation correction
    let overlap = (a.radius + b.radius) - distance;
    if overlap > 0.0 {
        let push = overlap * 0.5 + SEPARATION_SKIN;
        a.position = space.wrap_position(a.position - normal * push);
        b.position = space.wrap_position(b.position + normal * push);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::BossConfig;

    fn space_800x600() -> ToroidalSpace {
        ToroidalSpace::new(800, 600).unwrap()
    }

    fn asteroid(id: u32, x: f32, y: f32, radius: f32) -> CircleBody {
        CircleBody::new(BodyId(id), Vec2::new(x, y), Vec2::ZERO, radius, 3)
    }

    fn inert_ship() -> CircleBody {
        let mut ship = CircleBody::new(BodyId(1000), Vec2::new(700.0, 500.0), Vec2::ZERO, 15.0, 0);
        ship.active = false;
        ship
    }

    // detect() with only two asteroids in play
    fn detect_pair(
        ship: &CircleBody,
        space: &ToroidalSpace,
        a: &CircleBody,
        b: &CircleBody,
    ) -> Vec<CollisionOutcome> {
        detect(space, ship, &[a.clone(), b.clone()], &[], None)
    }

    #[test]
    fn test_overlap_symmetric() {
        let space = space_800x600();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(130.0, 100.0);

        assert_eq!(
            circles_overlap(&space, a, 20.0, b, 20.0),
            circles_overlap(&space, b, 20.0, a, 20.0),
        );
        assert!(circles_overlap(&space, a, 20.0, b, 20.0));
        assert!(!circles_overlap(&space, a, 10.0, b, 10.0));
    }

    #[test]
    fn test_overlap_symmetry_randomized() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let space = space_800x600();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let a = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            let b = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            let ra = rng.gen_range(1.0..60.0);
            let rb = rng.gen_range(1.0..60.0);

            assert_eq!(
                circles_overlap(&space, a, ra, b, rb),
                circles_overlap(&space, b, rb, a, ra),
            );
        }
    }

    #[test]
    fn test_direct_collision_scenario() {
        // Two size-3 bodies at (400,300) and (420,300), radius 20, world 800x600
        let space = space_800x600();
        let mut a = asteroid(1, 400.0, 300.0, 20.0);
        let mut b = asteroid(2, 420.0, 300.0, 20.0);
        a.velocity = Vec2::new(50.0, 0.0);
        b.velocity = Vec2::new(-50.0, 0.0);

        let outcomes = detect_pair(&inert_ship(), &space, &a, &b);
        assert_eq!(
            outcomes,
            vec![CollisionOutcome::AsteroidsCollided {
                a: BodyId(1),
                b: BodyId(2)
            }]
        );

        let (va, vb) = (a.velocity, b.velocity);
        resolve_elastic(&space, &mut a, &mut b);

        // Velocities changed and the head-on approach swapped
        assert_ne!(a.velocity, va);
        assert_ne!(b.velocity, vb);
        assert_eq!(a.velocity, Vec2::new(-50.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(50.0, 0.0));

        // Bodies end up separated after one correction pass
        assert!(space.wrapped_distance(a.position, b.position) >= 40.0);
    }

    #[test]
    fn test_wraparound_near_miss_is_a_hit() {
        // x=5 vs x=795 in a width-800 world: naive distance 790, wrapped 10
        let space = space_800x600();
        let a = asteroid(1, 5.0, 300.0, 10.0);
        let b = asteroid(2, 795.0, 300.0, 10.0);

        let outcomes = detect_pair(&inert_ship(), &space, &a, &b);
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn test_inactive_and_degenerate_skipped() {
        let space = space_800x600();
        let mut a = asteroid(1, 400.0, 300.0, 20.0);
        let b = asteroid(2, 410.0, 300.0, 20.0);

        a.active = false;
        assert!(detect_pair(&inert_ship(), &space, &a, &b).is_empty());

        // Zero radius also never collides
        a.active = true;
        a.radius = 0.0;
        assert!(detect_pair(&inert_ship(), &space, &a, &b).is_empty());
    }

    #[test]
    fn test_empty_sets_scan_clean() {
        let space = space_800x600();
        let outcomes = detect(&space, &inert_ship(), &[], &[], None);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_bullet_claims_one_asteroid() {
        let space = space_800x600();
        let bullet = CircleBody::new(BodyId(50), Vec2::new(400.0, 300.0), Vec2::ZERO, 4.0, 0);
        let near = asteroid(1, 405.0, 300.0, 20.0);
        let also_near = asteroid(2, 395.0, 300.0, 20.0);

        let outcomes = detect(
            &space,
            &inert_ship(),
            &[near, also_near],
            &[bullet],
            None,
        );

        // One bullet, one kill; the second asteroid survives this tick
        assert_eq!(
            outcomes,
            vec![CollisionOutcome::ProjectileStruckAsteroid {
                bullet: BodyId(50),
                asteroid: BodyId(1),
            }]
        );
    }

    #[test]
    fn test_claimed_asteroid_skipped_by_ship_pass() {
        let space = space_800x600();
        let bullet = CircleBody::new(BodyId(50), Vec2::new(400.0, 300.0), Vec2::ZERO, 4.0, 0);
        let target = asteroid(1, 405.0, 300.0, 20.0);
        let mut ship = CircleBody::new(BodyId(99), Vec2::new(410.0, 300.0), Vec2::ZERO, 15.0, 0);
        ship.active = true;

        let outcomes = detect(&space, &ship, &[target], &[bullet], None);

        // The bullet got there first; the ship does not also hit it
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            outcomes[0],
            CollisionOutcome::ProjectileStruckAsteroid { .. }
        ));
    }

    #[test]
    fn test_boss_detection() {
        let space = ToroidalSpace::new(1000, 750).unwrap();
        let boss = Boss::from_config(&BossConfig::default(), 1000.0, 500.0);

        // Bullet at the anchor is inside the hitbox
        let bullet = CircleBody::new(BodyId(50), boss.position, Vec2::ZERO, 4.0, 0);
        // Ship far away is not
        let mut ship = CircleBody::new(BodyId(99), Vec2::new(50.0, 700.0), Vec2::ZERO, 15.0, 0);
        ship.active = true;

        let outcomes = detect(&space, &ship, &[], &[bullet.clone()], Some(&boss));
        assert_eq!(
            outcomes,
            vec![CollisionOutcome::ProjectileStruckBoss { bullet: BodyId(50) }]
        );

        // Ship sitting on the anchor touches the boss
        ship.position = boss.position;
        let outcomes = detect(&space, &ship, &[], &[], Some(&boss));
        assert_eq!(outcomes, vec![CollisionOutcome::ShipStruckBoss]);

        // A dead boss is invisible to the detector
        let mut dead = boss;
        dead.alive = false;
        let outcomes = detect(&space, &ship, &[], &[bullet], Some(&dead));
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_elastic_swap_conserves_tangential_velocity() {
        let space = space_800x600();
        let mut a = asteroid(1, 400.0, 300.0, 20.0);
        let mut b = asteroid(2, 430.0, 300.0, 20.0);
        a.velocity = Vec2::new(50.0, 30.0);
        b.velocity = Vec2::new(-20.0, -10.0);

        resolve_elastic(&space, &mut a, &mut b);

        // Contact normal is +X, so y components ride through untouched
        assert_eq!(a.velocity, Vec2::new(-20.0, 30.0));
        assert_eq!(b.velocity, Vec2::new(50.0, -10.0));
    }

    #[test]
    fn test_elastic_resolves_coincident_centers() {
        let space = space_800x600();
        let mut a = asteroid(1, 400.0, 300.0, 20.0);
        let mut b = asteroid(2, 400.0, 300.0, 20.0);

        resolve_elastic(&space, &mut a, &mut b);
        assert!(space.wrapped_distance(a.position, b.position) >= 40.0);
    }
}
