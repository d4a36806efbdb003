//! Circle Bodies
//!
//! The shared shape for everything that moves and collides as a circle:
//! ship, asteroids, bullets. Owning collections live in `game::state`;
//! nothing here manages lifetime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::hash::StateHasher;
use crate::core::vec2::Vec2;

/// Unique body identifier (monotonic counter per state).
///
/// Implements Ord so claim sets and events sort deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A moving circular body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CircleBody {
    /// Unique ID assigned by the owning state
    pub id: BodyId,

    /// Current position
    pub position: Vec2,

    /// Current velocity in units/second
    pub velocity: Vec2,

    /// Collision radius; non-positive radii never collide
    pub radius: f32,

    /// Destruction-generation tier; higher tiers split into lower ones
    pub tier: u8,

    /// False once destroyed; swept from its collection at end of tick
    pub active: bool,
}

impl CircleBody {
    /// Create a new active body.
    pub fn new(id: BodyId, position: Vec2, velocity: Vec2, radius: f32, tier: u8) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            tier,
            active: true,
        }
    }

    /// Whether this body participates in collision tests.
    ///
    /// A non-positive radius marks a degenerate spawn; it drifts but never
    /// collides rather than erroring.
    #[inline]
    pub fn can_collide(&self) -> bool {
        self.active && self.radius > 0.0
    }

    /// Advance position by velocity over `dt` seconds.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Hash this body's state for fingerprinting.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id.0);
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.radius);
        hasher.update_u8(self.tier);
        hasher.update_bool(self.active);
    }
}

// =============================================================================
// TESTS
// =============================================================================
