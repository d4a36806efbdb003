//! Boss Motion and Hitbox
//!
//! The boss is the one non-circular entity. Its anchor drifts rightward with
//! a sine-wave vertical oscillation and teleports back to the left edge once
//! fully offscreen. Its hitbox is a polygon traced over the sprite,
//! translated (and optionally mirrored) into world space every tick.

use serde::{Deserialize, Serialize};

use crate::core::hash::StateHasher;
use crate::core::vec2::Vec2;
use crate::game::config::BossConfig;
use crate::game::space::ReentryStrip;

/// Time-driven patrol motion: linear horizontal drift plus sine vertical
/// offset around a center line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Horizontal speed in units/second
    pub speed: f32,
    /// Vertical oscillation amplitude
    pub amplitude: f32,
    /// Oscillation frequency in Hz
    pub frequency: f32,
    /// Center line for the vertical oscillation
    pub center_y: f32,
    sine_timer: f32,
}

impl MotionProfile {
    /// Create a profile with a zeroed sine timer.
    pub fn new(speed: f32, amplitude: f32, frequency: f32, center_y: f32) -> Self {
        Self {
            speed,
            amplitude,
            frequency,
            center_y,
            sine_timer: 0.0,
        }
    }

    /// Elapsed oscillation time since spawn.
    pub fn sine_timer(&self) -> f32 {
        self.sine_timer
    }

    /// Reset the oscillation timer (respawn only).
    pub fn reset(&mut self) {
        self.sine_timer = 0.0;
    }

    /// Advance the anchor by `dt` seconds.
    ///
    /// X integrates the patrol speed; Y is recomputed absolutely from the
    /// sine timer so oscillation never accumulates drift.
    pub fn advance(&mut self, position: &mut Vec2, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        self.sine_timer += dt;
        let offset_y =
            self.amplitude * (std::f32::consts::TAU * self.frequency * self.sine_timer).sin();

        position.x += self.speed * dt;
        position.y = self.center_y + offset_y;
    }
}

/// Polygon hitbox bound to a moving anchor.
///
/// Vertices are sprite-local; `world_vertices` translates them by the anchor
/// minus the sprite half-extent, mirroring x when flipped. Fewer than three
/// vertices degenerates to a hitbox that never collides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolygonHitbox {
    local: Vec<Vec2>,
    sprite_half_extent: f32,
    flip: bool,
}

impl PolygonHitbox {
    /// Build from sprite-local vertex pairs.
    pub fn new(points: &[(f32, f32)], sprite_half_extent: f32, flip: bool) -> Self {
        Self {
            local: points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            sprite_half_extent,
            flip,
        }
    }

    /// True when the polygon cannot collide (fewer than 3 vertices).
    pub fn is_degenerate(&self) -> bool {
        self.local.len() < 3
    }

    /// Whether the x-axis is mirrored.
    pub fn flipped(&self) -> bool {
        self.flip
    }

    /// Transform local vertices to world space for the given anchor.
    ///
    /// Pure and idempotent; recomputed every call rather than cached so a
    /// moved anchor can never serve stale geometry.
    pub fn world_vertices(&self, anchor: Vec2) -> Vec<Vec2> {
        let offset = self.sprite_half_extent;
        self.local
            .iter()
            .map(|v| {
                let lx = if self.flip { -v.x } else { v.x };
                Vec2::new(anchor.x - offset + lx, anchor.y - offset + v.y)
            })
            .collect()
    }
}

/// Even-odd point-in-polygon test.
///
/// Polygons with fewer than 3 vertices contain nothing.
pub fn point_in_polygon(vertices: &[Vec2], point: Vec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];

        if (vi.y > point.y) != (vj.y > point.y) {
            let t = (point.y - vi.y) / (vj.y - vi.y);
            let crossing_x = vi.x + t * (vj.x - vi.x);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Circle-vs-polygon test: containment or edge proximity.
///
/// Catches grazing hits a pure containment test would miss for a body whose
/// center stays just outside the boundary.
pub fn circle_intersects_polygon(vertices: &[Vec2], center: Vec2, radius: f32) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    if point_in_polygon(vertices, center) {
        return true;
    }

    let radius_sq = radius * radius;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        if segment_distance_squared(vertices[j], vertices[i], center) <= radius_sq {
            return true;
        }
        j = i;
    }
    false
}

/// Squared distance from `point` to the segment `a`-`b`.
fn segment_distance_squared(a: Vec2, b: Vec2, point: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance_squared(a);
    }

    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    point.distance_squared(closest)
}

/// Boss entity: anchor, motion profile, hitbox, re-entry strip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Boss {
    /// Anchor position in world space
    pub position: Vec2,
    /// Patrol motion state
    pub motion: MotionProfile,
    /// Sprite-local hitbox
    pub hitbox: PolygonHitbox,
    /// False once the encounter ends; the detector skips a dead boss
    pub alive: bool,
    reentry: ReentryStrip,
}

impl Boss {
    /// Spawn a boss at the given x from configuration.
    pub fn from_config(config: &BossConfig, world_width: f32, spawn_x: f32) -> Self {
        Self {
            position: Vec2::new(spawn_x, config.center_y),
            motion: MotionProfile::new(
                config.speed,
                config.amplitude,
                config.frequency,
                config.center_y,
            ),
            hitbox: PolygonHitbox::new(&config.hitbox, config.sprite_half_extent, config.flip),
            alive: true,
            reentry: ReentryStrip::new(world_width, config.margin),
        }
    }

    /// Advance patrol motion by `dt` seconds.
    /// Returns true when the anchor teleported back to the left edge.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.motion.advance(&mut self.position, dt);
        let (x, wrapped) = self.reentry.carry(self.position.x);
        self.position.x = x;
        wrapped
    }

    /// Current world-space hitbox vertices.
    pub fn world_vertices(&self) -> Vec<Vec2> {
        self.hitbox.world_vertices(self.position)
    }

    /// Hash boss state for fingerprinting.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_f32(self.motion.sine_timer());
        hasher.update_bool(self.alive);
    }
}

// =============================================================================
// TESTS
// =============================================================================
