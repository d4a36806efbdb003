//! Simulation Tick
//!
//! One call per frame from the host loop. Phases run in a fixed order and
//! the collision scan is strictly read-only; all mutation happens in the
//! apply pass that follows it.

use tracing::debug;

use crate::game::collision::{detect, resolve_elastic, BounceResponse, CollisionOutcome};
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::split::spawn_children;
use crate::game::state::GameState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in priority order
    pub events: Vec<GameEvent>,
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The world state (will be mutated)
/// * `dt` - Elapsed simulated time in seconds
/// * `config` - Simulation configuration
///
/// # Determinism
///
/// Given the same initial state and the same ordered dt sequence, this
/// function produces identical results on every run: iteration order is
/// collection order, randomness comes from the state's seeded RNG, and
/// nothing reads the wall clock.
///
/// A non-positive or non-finite `dt` is a paused frame: the state is left
/// untouched and no events fire.
pub fn tick(state: &mut GameState, dt: f32, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    if dt <= 0.0 || !dt.is_finite() {
        return result;
    }

    // 0. Advance tick counter
    state.tick += 1;

    // 1. Integrate velocities and wrap positions
    integrate_bodies(state, dt);

    // 2. Advance the boss patrol (hitbox follows the anchor implicitly)
    advance_boss(state, dt);

    // 3. Read-only collision scan
    let outcomes = detect(
        &state.space,
        &state.ship,
        &state.asteroids,
        &state.bullets,
        state.boss.as_ref(),
    );

    // 4. Apply responses: deactivate, split, bounce
    apply_outcomes(state, config, outcomes);

    // 5. Drop destroyed bodies
    state.sweep_inactive();

    result.events = state.take_events();
    result.events.sort();

    if !result.events.is_empty() {
        debug!(
            tick = state.tick,
            events = result.events.len(),
            "collision events"
        );
    }

    result
}

/// Replay a recorded dt sequence from an initial state.
///
/// Returns the final state and every event in order.
pub fn replay(
    mut state: GameState,
    dt_sequence: &[f32],
    config: &GameConfig,
) -> (GameState, Vec<GameEvent>) {
    let mut all_events = Vec::new();
    for &dt in dt_sequence {
        all_events.extend(tick(&mut state, dt, config).events);
    }
    (state, all_events)
}

/// Move every circle body by its velocity and wrap it back into bounds.
fn integrate_bodies(state: &mut GameState, dt: f32) {
    let space = state.space;

    if state.ship.active {
        state.ship.integrate(dt);
        state.ship.position = space.wrap_position(state.ship.position);
    }

    for body in state.asteroids.iter_mut().chain(state.bullets.iter_mut()) {
        if body.active {
            body.integrate(dt);
            body.position = space.wrap_position(body.position);
        }
    }
}

/// Advance boss motion; a re-entry teleport is reported as an event.
fn advance_boss(state: &mut GameState, dt: f32) {
    let tick = state.tick;
    let mut reentered_at = None;

    if let Some(boss) = state.boss.as_mut().filter(|b| b.alive) {
        if boss.advance(dt) {
            reentered_at = Some(boss.position.x);
        }
    }

    if let Some(x) = reentered_at {
        state.push_event(GameEvent::boss_reentered(tick, x));
    }
}

/// Apply collision responses in scan order.
fn apply_outcomes(state: &mut GameState, config: &GameConfig, outcomes: Vec<CollisionOutcome>) {
    let tick = state.tick;
    let space = state.space;

    for outcome in outcomes {
        match outcome {
            CollisionOutcome::ProjectileStruckAsteroid { bullet, asteroid } => {
                let Some(parent) = state.asteroid(asteroid).cloned() else {
                    continue;
                };

                let projectile_velocity = state.bullet_mut(bullet).map(|b| {
                    b.active = false;
                    b.velocity
                });
                if let Some(struck) = state.asteroid_mut(asteroid) {
                    struck.active = false;
                }

                let children = spawn_children(
                    &parent,
                    projectile_velocity,
                    &config.split,
                    &config.asteroid,
                    &mut state.rng,
                );
                let child_ids: Vec<_> =
                    children.into_iter().map(|c| state.adopt_child(c)).collect();

                state.push_event(GameEvent::asteroid_destroyed(
                    tick,
                    asteroid,
                    parent.tier,
                    bullet,
                    child_ids,
                ));
            }

            CollisionOutcome::ShipStruckAsteroid { asteroid } => {
                // The asteroid shatters without splitting; ship lives and
                // shields are the host's decision
                let Some(struck) = state.asteroid_mut(asteroid) else {
                    continue;
                };
                struck.active = false;
                let tier = struck.tier;
                state.push_event(GameEvent::ship_hit_asteroid(tick, asteroid, tier));
            }

            CollisionOutcome::AsteroidsCollided { a, b } => {
                if config.bounce == BounceResponse::ElasticSwap {
                    let ia = state.asteroids.iter().position(|x| x.id == a);
                    let ib = state.asteroids.iter().position(|x| x.id == b);
                    if let (Some(ia), Some(ib)) = (ia, ib) {
                        let (low, high) = (ia.min(ib), ia.max(ib));
                        let (left, right) = state.asteroids.split_at_mut(high);
                        resolve_elastic(&space, &mut left[low], &mut right[0]);
                    }
                }
                state.push_event(GameEvent::asteroids_bounced(tick, a, b));
            }

            CollisionOutcome::ProjectileStruckBoss { bullet } => {
                if let Some(spent) = state.bullet_mut(bullet) {
                    spent.active = false;
                }
                state.push_event(GameEvent::boss_hit(tick, bullet));
            }

            CollisionOutcome::ShipStruckBoss => {
                state.push_event(GameEvent::ship_hit_boss(tick));
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::events::GameEventData;

    fn small_world_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.world.width = 800;
        config.world.height = 600;
        config.split.jitter = false;
        config
    }

    fn new_state(config: &GameConfig) -> GameState {
        GameState::new(config, 12345).unwrap()
    }

    #[test]
    fn test_paused_frame_is_noop() {
        let config = small_world_config();
        let mut state = new_state(&config);
        state.spawn_asteroid(&config, 3, Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0));
        let before = state.fingerprint();

        assert!(tick(&mut state, 0.0, &config).events.is_empty());
        assert!(tick(&mut state, -0.5, &config).events.is_empty());
        assert!(tick(&mut state, f32::NAN, &config).events.is_empty());

        assert_eq!(state.fingerprint(), before);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_integration_wraps_positions() {
        let config = small_world_config();
        let mut state = new_state(&config);
        state.ship.active = false;
        let id = state.spawn_asteroid(&config, 3, Vec2::new(795.0, 300.0), Vec2::new(100.0, 0.0));

        tick(&mut state, 0.1, &config);

        let asteroid = state.asteroid(id).unwrap();
        assert!((asteroid.position.x - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_bullet_splits_asteroid() {
        let config = small_world_config();
        let mut state = new_state(&config);
        state.ship.active = false;

        let target = state.spawn_asteroid(&config, 3, Vec2::new(400.0, 300.0), Vec2::new(20.0, 0.0));
        state.spawn_bullet(&config, Vec2::new(400.0, 300.0), Vec2::ZERO);

        let result = tick(&mut state, 0.001, &config);

        // Parent and bullet gone, two tier-2 children adopted
        assert_eq!(state.active_asteroids(), 2);
        assert!(state.bullets.is_empty());
        for child in &state.asteroids {
            assert_eq!(child.tier, 2);
        }

        let destroyed = result
            .events
            .iter()
            .find_map(|e| match &e.data {
                GameEventData::AsteroidDestroyed {
                    asteroid, children, ..
                } => Some((*asteroid, children.clone())),
                _ => None,
            })
            .expect("destruction event");
        assert_eq!(destroyed.0, target);
        assert_eq!(destroyed.1.len(), 2);
    }

    #[test]
    fn test_minimum_tier_fully_destroyed() {
        let config = small_world_config();
        let mut state = new_state(&config);
        state.ship.active = false;

        state.spawn_asteroid(&config, 1, Vec2::new(400.0, 300.0), Vec2::new(20.0, 0.0));
        state.spawn_bullet(&config, Vec2::new(400.0, 300.0), Vec2::ZERO);

        tick(&mut state, 0.001, &config);

        assert_eq!(state.active_asteroids(), 0);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_ship_collision_reported_not_resolved() {
        let config = small_world_config();
        let mut state = new_state(&config);

        let ship_pos = state.ship.position;
        state.spawn_asteroid(&config, 3, ship_pos, Vec2::ZERO);

        let result = tick(&mut state, 0.001, &config);

        // Asteroid shattered without children; the ship is untouched
        assert!(state.asteroids.is_empty());
        assert!(state.ship.active);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::ShipHitAsteroid { .. })));
    }

    #[test]
    fn test_asteroids_bounce_elastically() {
        let config = small_world_config();
        let mut state = new_state(&config);
        state.ship.active = false;

        let a = state.spawn_asteroid(&config, 3, Vec2::new(400.0, 300.0), Vec2::new(50.0, 0.0));
        let b = state.spawn_asteroid(&config, 3, Vec2::new(430.0, 300.0), Vec2::new(-50.0, 0.0));

        let result = tick(&mut state, 0.001, &config);

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::AsteroidsBounced { .. })));

        // Head-on equal-mass swap
        assert_eq!(state.asteroid(a).unwrap().velocity.x, -50.0);
        assert_eq!(state.asteroid(b).unwrap().velocity.x, 50.0);

        // Separated after one correction pass
        let pa = state.asteroid(a).unwrap().position;
        let pb = state.asteroid(b).unwrap().position;
        let radii = state.asteroid(a).unwrap().radius + state.asteroid(b).unwrap().radius;
        assert!(state.space.wrapped_distance(pa, pb) >= radii);
    }

    #[test]
    fn test_bounce_policy_ignore_still_reports() {
        let mut config = small_world_config();
        config.bounce = BounceResponse::Ignore;
        let mut state = new_state(&config);
        state.ship.active = false;

        let a = state.spawn_asteroid(&config, 3, Vec2::new(400.0, 300.0), Vec2::new(50.0, 0.0));
        state.spawn_asteroid(&config, 3, Vec2::new(430.0, 300.0), Vec2::new(-50.0, 0.0));

        let result = tick(&mut state, 0.001, &config);

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::AsteroidsBounced { .. })));
        // Velocity untouched (integration aside, x stays positive)
        assert!(state.asteroid(a).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_bullet_hits_boss() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1).unwrap();
        state.ship.active = false;
        state.spawn_boss(&config, 500.0);

        let anchor = state.boss.as_ref().unwrap().position;
        state.spawn_bullet(&config, anchor, Vec2::ZERO);

        let result = tick(&mut state, 0.001, &config);

        assert!(state.bullets.is_empty());
        assert!(state.boss.as_ref().unwrap().alive, "boss health is external");
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::BossHit { .. })));
    }

    #[test]
    fn test_boss_reentry_event() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1).unwrap();
        state.ship.active = false;
        state.spawn_boss(&config, 1299.0);

        // One second at speed 60 carries the boss past width + margin
        let result = tick(&mut state, 1.0, &config);

        let reentered = result
            .events
            .iter()
            .find_map(|e| match e.data {
                GameEventData::BossReentered { x } => Some(x),
                _ => None,
            })
            .expect("re-entry event");
        assert_eq!(reentered, -300.0);
    }

    #[test]
    fn test_ship_events_sort_first() {
        let config = small_world_config();
        let mut state = new_state(&config);

        // A bounce pair far away plus an asteroid on the ship
        state.spawn_asteroid(&config, 3, Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.spawn_asteroid(&config, 3, Vec2::new(110.0, 100.0), Vec2::ZERO);
        state.spawn_asteroid(&config, 3, state.ship.position, Vec2::ZERO);

        let result = tick(&mut state, 0.001, &config);

        assert!(result.events.len() >= 2);
        assert!(matches!(
            result.events[0].data,
            GameEventData::ShipHitAsteroid { .. }
        ));
    }

    #[test]
    fn test_replay_determinism() {
        let config = small_world_config();

        let build = || {
            let mut state = GameState::new(&config, 777).unwrap();
            state.spawn_boss(&config, 500.0);
            for i in 0u8..6 {
                let heading = state.rng.next_angle();
                let pos = state
                    .rng
                    .next_position(state.space.width(), state.space.height());
                state.spawn_asteroid(&config, 3 + (i % 3), pos, Vec2::from_heading(heading) * 60.0);
            }
            state.spawn_bullet(&config, Vec2::new(400.0, 300.0), Vec2::new(600.0, 0.0));
            state
        };

        let dts: Vec<f32> = (0..240).map(|i| if i % 7 == 0 { 0.02 } else { 0.016 }).collect();

        let (final1, events1) = replay(build(), &dts, &config);
        let (final2, events2) = replay(build(), &dts, &config);

        assert_eq!(final1.fingerprint(), final2.fingerprint());
        assert_eq!(events1, events2);
    }
}
