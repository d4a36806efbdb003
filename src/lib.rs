//! # Stardrift Core
//!
//! Deterministic collision and movement core for Stardrift, a toroidal
//! arcade shooter with an asteroid field and a polygon-hitboxed boss.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      STARDRIFT CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── vec2.rs      - 2D vector value type                     │
//! │  ├── rng.rs       - Seeded Xorshift128+ PRNG                 │
//! │  └── hash.rs      - State fingerprints for replay checks     │
//! │                                                              │
//! │  game/            - Simulation logic (deterministic)         │
//! │  ├── config.rs    - Validated tunables                       │
//! │  ├── space.rs     - Toroidal metric, boss re-entry strip     │
//! │  ├── body.rs      - Circle bodies                            │
//! │  ├── boss.rs      - Sine patrol + polygon hitbox             │
//! │  ├── collision.rs - Pair scan and elastic response           │
//! │  ├── split.rs     - Asteroid destruction policy              │
//! │  ├── events.rs    - Outcomes as plain data                   │
//! │  ├── state.rs     - Owning collections and snapshots         │
//! │  └── tick.rs      - Per-frame orchestration                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Given identical initial state, seed and ordered dt sequence, the
//! simulation produces identical positions, events and fingerprints:
//!
//! - iteration order is collection order, never hash order
//! - all randomness comes from the seeded Xorshift128+ RNG
//! - no wall-clock reads; the host supplies every dt
//!
//! Rendering, audio, input and scoring live in the host. The core hands out
//! read-only snapshots and plain-data events, and never calls back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::hash::StateHash;
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::Vec2;
pub use game::body::{BodyId, CircleBody};
pub use game::config::{ConfigError, GameConfig};
pub use game::events::{GameEvent, GameEventData};
pub use game::space::ToroidalSpace;
pub use game::state::{GameState, WorldSnapshot};
pub use game::tick::{replay, tick, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference simulation tick rate (Hz); hosts may run any dt they like
pub const TICK_RATE: u32 = 60;
