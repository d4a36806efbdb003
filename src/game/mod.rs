//! Simulation Logic
//!
//! All game rules. Deterministic given a seed and a dt sequence.
//!
//! ## Module Structure
//!
//! - `config`: validated tunables
//! - `space`: toroidal metric and boss re-entry strip
//! - `body`: circle bodies shared by ship/asteroids/bullets
//! - `boss`: motion profile and polygon hitbox
//! - `collision`: read-only pair scan and elastic response
//! - `split`: destruction policy for asteroids
//! - `events`: outcomes as plain data for the host
//! - `state`: owning collections, snapshots, fingerprints
//! - `tick`: per-frame orchestration

pub mod body;
pub mod boss;
pub mod collision;
pub mod config;
pub mod events;
pub mod space;
pub mod split;
pub mod state;
pub mod tick;

// Re-export key types
pub use body::{BodyId, CircleBody};
pub use boss::{Boss, MotionProfile, PolygonHitbox};
pub use collision::{BounceResponse, CollisionOutcome};
pub use config::{ConfigError, GameConfig};
pub use events::{GameEvent, GameEventData};
pub use space::{ReentryStrip, ToroidalSpace};
pub use state::{GameState, WorldSnapshot};
pub use tick::{replay, tick, TickResult};
