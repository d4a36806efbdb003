//! Toroidal World Geometry
//!
//! The playfield wraps at every edge: an object leaving the right side
//! reappears on the left, so "distance" means shortest path on the torus.
//! The boss is the exception - it patrols left to right and teleports back
//! via `ReentryStrip`, a deliberately separate strategy from the modulo wrap.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::config::ConfigError;

/// Wrapping world bounds with shortest-path metric.
///
/// Stateless; all operations are pure functions of the stored dimensions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ToroidalSpace {
    width: f32,
    height: f32,
}

impl ToroidalSpace {
    /// Create a space from positive integer dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidWorldSize { width, height });
        }
        Ok(Self {
            width: width as f32,
            height: height as f32,
        })
    }

    /// World width in units.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World height in units.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Shortest signed displacement from `a` to `b` on the torus.
    ///
    /// Each axis is corrected independently: a raw difference longer than
    /// half the dimension goes the other way around. At exactly half a
    /// dimension no correction is applied, so the result is deterministic.
    pub fn wrapped_delta(&self, a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(b.x - a.x, self.width),
            wrap_axis(b.y - a.y, self.height),
        )
    }

    /// Shortest distance between two points on the torus.
    #[inline]
    pub fn wrapped_distance(&self, a: Vec2, b: Vec2) -> f32 {
        self.wrapped_delta(a, b).length()
    }

    /// Reduce a position into `[0, width) x [0, height)`.
    ///
    /// Euclidean remainder, so arbitrarily negative inputs land in bounds.
    pub fn wrap_position(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
    }
}

/// Correct one axis of a raw difference to the shortest wrapped displacement.
#[inline]
fn wrap_axis(delta: f32, dimension: f32) -> f32 {
    let half = dimension * 0.5;
    if delta > half {
        delta - dimension
    } else if delta < -half {
        delta + dimension
    } else {
        delta
    }
}

/// One-directional screen re-entry for the boss.
///
/// Not a torus: the boss always travels rightward and teleports back to the
/// left edge once it is fully offscreen. The margin keeps the sprite from
/// popping in mid-screen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ReentryStrip {
    limit: f32,
    reset: f32,
}

impl ReentryStrip {
    /// Strip for a world of the given width with the given offscreen margin.
    pub fn new(width: f32, margin: f32) -> Self {
        Self {
            limit: width + margin,
            reset: -margin,
        }
    }

    /// Teleport `x` back to the left edge if it has left the strip.
    /// Returns the corrected coordinate and whether a teleport happened.
    pub fn carry(&self, x: f32) -> (f32, bool) {
        if x > self.limit {
            (self.reset, true)
        } else {
            (x, false)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
