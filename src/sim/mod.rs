//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Stable iteration order (platforms in spawn order)
//! - No rendering or platform dependencies

pub mod color;
pub mod difficulty;
pub mod platform;
pub mod player;
pub mod scroll;
pub mod spawner;
pub mod state;
pub mod tick;

pub use color::{ColorState, GameColor};
pub use difficulty::{
    DifficultyCurve, DifficultyLevel, DifficultyPreset, DifficultyState, height_climbed,
    score_from_height,
};
pub use platform::{Aabb, Platform, latch_contacts, update_solidity};
pub use player::Player;
pub use scroll::{ScrollState, ScrollUpdate};
pub use spawner::{PlatformSpawner, PlayableBand};
pub use state::{GameEvent, GamePhase, RngState, RunState};
pub use tick::{TickInput, tick};
