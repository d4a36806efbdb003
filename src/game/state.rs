//! World State
//!
//! The owning container for everything the simulation mutates: ship,
//! asteroid and bullet collections, the boss, the seeded RNG and the pending
//! event queue. Creation and removal of bodies happen here and nowhere else;
//! the detector only reads and mutates fields.

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::GameRng;
use crate::core::vec2::Vec2;
use crate::game::body::{BodyId, CircleBody};
use crate::game::boss::Boss;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::events::GameEvent;
use crate::game::space::ToroidalSpace;
use crate::game::split::ChildSpawn;

/// What a snapshotted body is, for rendering dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// The player ship
    Ship,
    /// An asteroid
    Asteroid,
    /// A bullet
    Bullet,
}

/// Read-only drawing data for one circular body.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BodySnapshot {
    /// Body identity
    pub id: BodyId,
    /// Kind for sprite selection
    pub kind: BodyKind,
    /// World position
    pub position: Vec2,
    /// Collision radius
    pub radius: f32,
}

/// Read-only drawing data for the boss.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BossSnapshot {
    /// Anchor position
    pub position: Vec2,
    /// World-space hitbox outline
    pub vertices: Vec<Vec2>,
}

/// One frame's worth of drawing data. The core never calls into rendering;
/// the host pulls this and draws.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Tick the snapshot was taken on
    pub tick: u64,
    /// All active circular bodies
    pub bodies: Vec<BodySnapshot>,
    /// Boss outline, if one is alive
    pub boss: Option<BossSnapshot>,
}

/// Complete simulation state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Current tick
    pub tick: u64,

    /// World geometry
    pub space: ToroidalSpace,

    /// The player ship (inactive while destroyed/respawning)
    pub ship: CircleBody,

    /// All asteroids
    pub asteroids: Vec<CircleBody>,

    /// All live bullets
    pub bullets: Vec<CircleBody>,

    /// The boss, if spawned
    pub boss: Option<Boss>,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    pub rng: GameRng,

    /// Next body ID (monotonic counter)
    next_body_id: u32,

    /// Events generated this tick (drained by the tick driver)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state from validated configuration.
    ///
    /// The ship starts active at the world center; asteroids, bullets and
    /// boss are spawned by the host.
    pub fn new(config: &GameConfig, rng_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let space = ToroidalSpace::new(config.world.width, config.world.height)?;

        let center = Vec2::new(space.width() * 0.5, space.height() * 0.5);
        let ship = CircleBody::new(BodyId(0), center, Vec2::ZERO, config.ship_radius, 0);

        Ok(Self {
            tick: 0,
            space,
            ship,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            boss: None,
            rng_seed,
            rng: GameRng::new(rng_seed),
            next_body_id: 1,
            pending_events: Vec::new(),
        })
    }

    fn alloc_id(&mut self) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    /// Spawn an asteroid of the given tier; radius comes from the config's
    /// tier table.
    pub fn spawn_asteroid(
        &mut self,
        config: &GameConfig,
        tier: u8,
        position: Vec2,
        velocity: Vec2,
    ) -> BodyId {
        let id = self.alloc_id();
        let radius = config.asteroid.radius_for_tier(tier);
        self.asteroids
            .push(CircleBody::new(id, position, velocity, radius, tier));
        id
    }

    /// Spawn a bullet.
    pub fn spawn_bullet(&mut self, config: &GameConfig, position: Vec2, velocity: Vec2) -> BodyId {
        let id = self.alloc_id();
        self.bullets
            .push(CircleBody::new(id, position, velocity, config.bullet_radius, 0));
        id
    }

    /// Spawn the boss at the given x.
    pub fn spawn_boss(&mut self, config: &GameConfig, spawn_x: f32) {
        self.boss = Some(Boss::from_config(&config.boss, self.space.width(), spawn_x));
    }

    /// Adopt a split child into the asteroid collection.
    pub fn adopt_child(&mut self, child: ChildSpawn) -> BodyId {
        let id = self.alloc_id();
        self.asteroids.push(CircleBody::new(
            id,
            child.position,
            child.velocity,
            child.radius,
            child.tier,
        ));
        id
    }

    /// Find an asteroid by ID.
    pub fn asteroid(&self, id: BodyId) -> Option<&CircleBody> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    /// Find an asteroid mutably by ID.
    pub fn asteroid_mut(&mut self, id: BodyId) -> Option<&mut CircleBody> {
        self.asteroids.iter_mut().find(|a| a.id == id)
    }

    /// Find a bullet mutably by ID.
    pub fn bullet_mut(&mut self, id: BodyId) -> Option<&mut CircleBody> {
        self.bullets.iter_mut().find(|b| b.id == id)
    }

    /// Count of asteroids still in play.
    pub fn active_asteroids(&self) -> usize {
        self.asteroids.iter().filter(|a| a.active).count()
    }

    /// Drop deactivated bodies from the collections.
    ///
    /// Runs after the apply pass, never during a scan, so iteration order
    /// within a tick is stable.
    pub fn sweep_inactive(&mut self) {
        self.asteroids.retain(|a| a.active);
        self.bullets.retain(|b| b.active);
    }

    /// Read-only drawing data for the current frame.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut bodies = Vec::with_capacity(1 + self.asteroids.len() + self.bullets.len());

        if self.ship.active {
            bodies.push(BodySnapshot {
                id: self.ship.id,
                kind: BodyKind::Ship,
                position: self.ship.position,
                radius: self.ship.radius,
            });
        }
        for asteroid in self.asteroids.iter().filter(|a| a.active) {
            bodies.push(BodySnapshot {
                id: asteroid.id,
                kind: BodyKind::Asteroid,
                position: asteroid.position,
                radius: asteroid.radius,
            });
        }
        for bullet in self.bullets.iter().filter(|b| b.active) {
            bodies.push(BodySnapshot {
                id: bullet.id,
                kind: BodyKind::Bullet,
                position: bullet.position,
                radius: bullet.radius,
            });
        }

        let boss = self.boss.as_ref().filter(|b| b.alive).map(|b| BossSnapshot {
            position: b.position,
            vertices: b.world_vertices(),
        });

        WorldSnapshot {
            tick: self.tick,
            bodies,
            boss,
        }
    }

    /// Compute the state fingerprint for replay verification.
    pub fn fingerprint(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            self.ship.hash_into(hasher);

            for asteroid in &self.asteroids {
                asteroid.hash_into(hasher);
            }
            for bullet in &self.bullets {
                bullet.hash_into(hasher);
            }

            if let Some(boss) = &self.boss {
                boss.hash_into(hasher);
            }

            hasher.update_u32(self.next_body_id);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
