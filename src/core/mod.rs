//! Core deterministic primitives.
//!
//! Value types and utilities with no game rules in them: vectors, the seeded
//! PRNG, and state fingerprinting. Everything here is replay-safe.

pub mod hash;
pub mod rng;
pub mod vec2;

// Re-export core types
pub use hash::{compute_state_hash, StateHash};
pub use rng::GameRng;
pub use vec2::Vec2;
