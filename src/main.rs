//! Stardrift Headless Demo
//!
//! Drives the core through a simulated session the way a real host loop
//! would: spawn a field, spawn the boss, fire bullets, feed fixed dt ticks,
//! and react to the reported events. No rendering - just logs.

use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use stardrift::{
    game::events::GameEventData,
    game::tick::tick,
    GameConfig, GameState, Vec2, TICK_RATE, VERSION,
};

/// Bullets expire after this many seconds; lifetime is a host concern.
const BULLET_LIFETIME: f32 = 2.0;

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Stardrift core v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    demo_session();
}

/// Run a 60-second scripted session.
fn demo_session() {
    let config = GameConfig::default();
    let seed = 12345u64;
    let mut state = GameState::new(&config, seed).expect("default config is valid");

    info!("RNG seed: {}", seed);

    // Scatter the opening field away from the ship
    let ship_pos = state.ship.position;
    for tier in [5u8, 4, 4, 3, 3, 3, 2, 2] {
        let position = loop {
            let candidate = state
                .rng
                .next_position(state.space.width(), state.space.height());
            if state.space.wrapped_distance(candidate, ship_pos) > 200.0 {
                break candidate;
            }
        };
        let speed = state.rng.next_range(40.0, 110.0);
        let velocity = state.rng.next_direction() * speed;
        state.spawn_asteroid(&config, tier, position, velocity);
    }

    // Boss enters from the left, fully offscreen
    state.spawn_boss(&config, -config.boss.margin);

    let dt = 1.0 / TICK_RATE as f32;
    let total_ticks = 60 * TICK_RATE as u64;
    let mut live_bullets: Vec<(stardrift::BodyId, u64)> = Vec::new();
    let mut score: u64 = 0;
    let mut boss_hits = 0u32;
    let mut ship_hits = 0u32;

    for t in 0..total_ticks {
        // Expire old bullets
        let expiry = (BULLET_LIFETIME * TICK_RATE as f32) as u64;
        live_bullets.retain(|&(id, born)| {
            if t.saturating_sub(born) > expiry {
                if let Some(bullet) = state.bullet_mut(id) {
                    bullet.active = false;
                }
                false
            } else {
                true
            }
        });

        // Fire a bullet every 12 ticks in a drifting direction
        if t % 12 == 0 {
            let heading = state.rng.next_angle();
            let id = state.spawn_bullet(
                &config,
                state.ship.position,
                Vec2::from_heading(heading) * 600.0,
            );
            live_bullets.push((id, t));
        }

        let result = tick(&mut state, dt, &config);

        for event in &result.events {
            match &event.data {
                GameEventData::AsteroidDestroyed { tier, children, .. } => {
                    score += *tier as u64 * 100;
                    debug!(
                        tick = event.tick,
                        tier, children = children.len(), "asteroid destroyed"
                    );
                }
                GameEventData::ShipHitAsteroid { tier, .. } => {
                    ship_hits += 1;
                    info!(tick = event.tick, tier, "ship struck an asteroid");
                }
                GameEventData::ShipHitBoss => {
                    ship_hits += 1;
                    info!(tick = event.tick, "ship clipped the boss");
                }
                GameEventData::BossHit { .. } => {
                    boss_hits += 1;
                    debug!(tick = event.tick, "boss took a hit");
                }
                GameEventData::AsteroidsBounced { .. } => {}
                GameEventData::BossReentered { x } => {
                    debug!(tick = event.tick, x, "boss re-entered");
                }
            }
        }

        if t % (10 * TICK_RATE as u64) == 0 && t > 0 {
            info!(
                tick = t,
                asteroids = state.active_asteroids(),
                score,
                boss_hits,
                "progress"
            );
        }
    }

    let sample = serde_json::to_string(&state.snapshot()).expect("snapshot serializes");
    info!("final snapshot: {} bytes of JSON", sample.len());
    info!(
        asteroids = state.active_asteroids(),
        score, boss_hits, ship_hits, "session over"
    );
    info!("state fingerprint: {}", hex::encode(state.fingerprint()));
}
