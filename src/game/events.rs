//! Game Events
//!
//! Collision and motion outcomes as plain data. The core never plays a
//! sound or adjusts a score; it reports what happened and the host reacts.

use serde::{Deserialize, Serialize};

use crate::game::body::BodyId;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Ship collisions decide lives, process first
    ShipCollision = 0,
    /// Then boss damage
    BossDamage = 1,
    /// Then asteroid destruction
    Destruction = 2,
    /// Then elastic bounces
    Bounce = 3,
    /// Then motion notifications
    Motion = 4,
    /// Lowest priority
    Other = 255,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Ship overlapped an asteroid; the asteroid is gone, lives are the
    /// host's problem
    ShipHitAsteroid {
        /// The struck asteroid
        asteroid: BodyId,
        /// Its tier at destruction (scoring input)
        tier: u8,
    },

    /// Ship touched the boss hitbox
    ShipHitBoss,

    /// A bullet landed inside the boss hitbox
    BossHit {
        /// The spent bullet
        bullet: BodyId,
    },

    /// A bullet destroyed an asteroid
    AsteroidDestroyed {
        /// The destroyed asteroid
        asteroid: BodyId,
        /// Its tier at destruction (scoring input)
        tier: u8,
        /// The spent bullet
        bullet: BodyId,
        /// Children spawned by the split (empty at minimum tier)
        children: Vec<BodyId>,
    },

    /// Two asteroids exchanged velocities elastically
    AsteroidsBounced {
        /// First participant
        a: BodyId,
        /// Second participant
        b: BodyId,
    },

    /// The boss teleported back to the left edge
    BossReentered {
        /// Anchor x after the teleport
        x: f32,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u64,

    /// Processing priority
    pub priority: EventPriority,

    /// Primary body involved (for tie-breaking; None for boss-only events)
    pub body: Option<BodyId>,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, priority: EventPriority, data: GameEventData) -> Self {
        let body = match &data {
            GameEventData::ShipHitAsteroid { asteroid, .. } => Some(*asteroid),
            GameEventData::ShipHitBoss => None,
            GameEventData::BossHit { bullet } => Some(*bullet),
            GameEventData::AsteroidDestroyed { asteroid, .. } => Some(*asteroid),
            GameEventData::AsteroidsBounced { a, .. } => Some(*a),
            GameEventData::BossReentered { .. } => None,
        };

        Self {
            tick,
            priority,
            body,
            data,
        }
    }

    /// Ship struck an asteroid.
    pub fn ship_hit_asteroid(tick: u64, asteroid: BodyId, tier: u8) -> Self {
        Self::new(
            tick,
            EventPriority::ShipCollision,
            GameEventData::ShipHitAsteroid { asteroid, tier },
        )
    }

    /// Ship touched the boss.
    pub fn ship_hit_boss(tick: u64) -> Self {
        Self::new(tick, EventPriority::ShipCollision, GameEventData::ShipHitBoss)
    }

    /// Bullet struck the boss.
    pub fn boss_hit(tick: u64, bullet: BodyId) -> Self {
        Self::new(tick, EventPriority::BossDamage, GameEventData::BossHit { bullet })
    }

    /// Bullet destroyed an asteroid.
    pub fn asteroid_destroyed(
        tick: u64,
        asteroid: BodyId,
        tier: u8,
        bullet: BodyId,
        children: Vec<BodyId>,
    ) -> Self {
        Self::new(
            tick,
            EventPriority::Destruction,
            GameEventData::AsteroidDestroyed {
                asteroid,
                tier,
                bullet,
                children,
            },
        )
    }

    /// Two asteroids bounced.
    pub fn asteroids_bounced(tick: u64, a: BodyId, b: BodyId) -> Self {
        Self::new(
            tick,
            EventPriority::Bounce,
            GameEventData::AsteroidsBounced { a, b },
        )
    }

    /// Boss re-entered from the left.
    pub fn boss_reentered(tick: u64, x: f32) -> Self {
        Self::new(tick, EventPriority::Motion, GameEventData::BossReentered { x })
    }
}

impl PartialOrd for GameEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for GameEvent {}

impl Ord for GameEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then priority, then body
        self.tick
            .cmp(&other.tick)
            .then(self.priority.cmp(&other.priority))
            .then(self.body.cmp(&other.body))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ordering() {
        let ship = GameEvent::ship_hit_asteroid(10, BodyId(3), 2);
        let destroyed = GameEvent::asteroid_destroyed(10, BodyId(1), 3, BodyId(9), vec![]);
        let bounce_a = GameEvent::asteroids_bounced(10, BodyId(1), BodyId(2));
        let bounce_b = GameEvent::asteroids_bounced(10, BodyId(4), BodyId(5));

        // Same tick: ship collisions come first
        assert!(ship < destroyed);
        assert!(destroyed < bounce_a);

        // Same tick and priority: lower body id first
        assert!(bounce_a < bounce_b);

        // Earlier tick always wins
        let late_ship = GameEvent::ship_hit_asteroid(11, BodyId(0), 2);
        assert!(bounce_b < late_ship);
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::asteroid_destroyed(5, BodyId(1), 3, BodyId(2), vec![BodyId(10)]);
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
