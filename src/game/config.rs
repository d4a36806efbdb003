//! Simulation Configuration
//!
//! All tunables the host hands to the core, validated at construction.
//! Defaults reproduce the shipped game's values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::collision::BounceResponse;

/// Base asteroid radius at tier scale 1.0.
pub const BASE_ASTEROID_RADIUS: f32 = 50.0;

/// Hitboxes run slightly inside the sprite silhouette.
pub const HITBOX_SCALE: f32 = 0.925;

/// Per-tier sprite scale factors, tiers 1 through 9.
pub const TIER_SCALES: [f32; 9] = [0.25, 0.5, 0.75, 1.0, 1.5, 3.0, 4.5, 6.0, 7.5];

/// Default boss hitbox silhouette in sprite-local coordinates.
///
/// Traced over the 500x500 boss sprite with the polygon editing tool;
/// insertion order defines the edges. With the 250 half-extent offset the
/// shape spans roughly +/-550 in x and +/-270 in y around the anchor.
pub const DEFAULT_BOSS_HITBOX: [(f32, f32); 11] = [
    (800.0, 430.0),
    (680.0, 370.0),
    (580.0, 310.0),
    (550.0, 170.0),
    (410.0, 190.0),
    (370.0, 90.0),
    (170.0, -20.0),
    (-180.0, 30.0),
    (-300.0, 210.0),
    (-130.0, 420.0),
    (310.0, 520.0),
];

/// Configuration rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// World dimensions must be positive.
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidWorldSize {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },

    /// The per-tier radius table may not be empty.
    #[error("asteroid tier radius table is empty")]
    EmptyRadiusTable,

    /// The boss must be fully offscreen before teleporting.
    #[error("boss margin {margin} is smaller than the sprite half-extent {half_extent}")]
    BossMarginTooSmall {
        /// Configured re-entry margin (world units, truncated for display)
        margin: i64,
        /// Sprite half-extent the margin must cover
        half_extent: i64,
    },
}

/// World dimensions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in units (> 0)
    pub width: u32,
    /// World height in units (> 0)
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 750,
        }
    }
}

/// Asteroid sizing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AsteroidConfig {
    /// Collision radius per tier; index 0 holds tier 1.
    pub tier_radii: Vec<f32>,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            tier_radii: TIER_SCALES
                .iter()
                .map(|s| BASE_ASTEROID_RADIUS * s * HITBOX_SCALE)
                .collect(),
        }
    }
}

impl AsteroidConfig {
    /// Collision radius for a tier. Unknown tiers fall back to the base
    /// radius, matching the sprite-scaling table's behavior.
    pub fn radius_for_tier(&self, tier: u8) -> f32 {
        if tier == 0 {
            return 0.0;
        }
        self.tier_radii
            .get(tier as usize - 1)
            .copied()
            .unwrap_or(BASE_ASTEROID_RADIUS * HITBOX_SCALE)
    }

    /// Highest tier the radius table covers.
    pub fn max_tier(&self) -> u8 {
        self.tier_radii.len() as u8
    }
}

/// Splitting behavior on asteroid destruction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Children spawned per destroyed asteroid above the minimum tier.
    pub children: u8,
    /// Tier at or below which destruction spawns nothing.
    pub min_tier: u8,
    /// Half-spread of the child heading fan, radians from the parent heading.
    pub spread: f32,
    /// Child speed relative to parent speed.
    pub speed_scale: f32,
    /// Multiplicative speed jitter half-range (0.3 = x0.7 to x1.3).
    pub speed_jitter: f32,
    /// Fraction of the destroying projectile's velocity inherited by children.
    pub projectile_coupling: f32,
    /// When false, children take fixed +/- spread/2 headings with no speed
    /// jitter. Tests use this to pin down exact child velocities.
    pub jitter: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            children: 2,
            min_tier: 1,
            spread: std::f32::consts::FRAC_PI_3,
            speed_scale: 1.3,
            speed_jitter: 0.3,
            projectile_coupling: 0.05,
            jitter: true,
        }
    }
}

/// Boss motion and hitbox parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BossConfig {
    /// Horizontal speed in units/second.
    pub speed: f32,
    /// Sine oscillation amplitude in units.
    pub amplitude: f32,
    /// Sine oscillation frequency in Hz.
    pub frequency: f32,
    /// Center line the vertical oscillation rides on.
    pub center_y: f32,
    /// Offscreen margin for the one-directional re-entry teleport.
    pub margin: f32,
    /// Half the sprite's edge length; hitbox coordinates are sprite-local.
    pub sprite_half_extent: f32,
    /// Mirror the hitbox horizontally.
    pub flip: bool,
    /// Hitbox vertices in sprite-local coordinates.
    pub hitbox: Vec<(f32, f32)>,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            speed: 60.0,
            amplitude: 10.0,
            frequency: 0.1,
            center_y: 300.0,
            margin: 300.0,
            sprite_half_extent: 250.0,
            flip: false,
            hitbox: DEFAULT_BOSS_HITBOX.to_vec(),
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// World dimensions.
    pub world: WorldConfig,
    /// Asteroid sizing.
    pub asteroid: AsteroidConfig,
    /// Split behavior.
    pub split: SplitConfig,
    /// Boss parameters.
    pub boss: BossConfig,
    /// Response applied to asteroid-asteroid contacts.
    pub bounce: BounceResponse,
    /// Ship collision radius.
    pub ship_radius: f32,
    /// Bullet collision radius.
    pub bullet_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            asteroid: AsteroidConfig::default(),
            split: SplitConfig::default(),
            boss: BossConfig::default(),
            bounce: BounceResponse::ElasticSwap,
            ship_radius: 15.0,
            bullet_radius: 4.0,
        }
    }
}

impl GameConfig {
    /// Validate the configuration.
    ///
    /// Bad geometry is a construction-time error, never a runtime surprise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world.width,
                height: self.world.height,
            });
        }

        if self.asteroid.tier_radii.is_empty() {
            return Err(ConfigError::EmptyRadiusTable);
        }

        if self.boss.margin < self.boss.sprite_half_extent {
            return Err(ConfigError::BossMarginTooSmall {
                margin: self.boss.margin as i64,
                half_extent: self.boss.sprite_half_extent as i64,
            });
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
