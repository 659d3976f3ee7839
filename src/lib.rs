//! Chromask - a color-masking vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (colors, difficulty, spawner, camera, physics)
//! - `scene`: Lifecycle hooks driving the simulation once per frame
//! - `view`: Plain-data frame snapshots for whatever renders the game
//! - `settings`: Difficulty and sound preferences over a key-value store
//! - `tuning`: Data-driven tunables

pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use scene::{GameOver, GameScene};
pub use settings::{DifficultyLevel, Settings, SoundSettings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the headless driver steps at
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default canvas dimensions
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player physics
    pub const PLAYER_MOVE_SPEED: f32 = 300.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = -500.0; // negative = up
    pub const PLAYER_GRAVITY: f32 = 800.0;
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Platform dimensions
    pub const PLATFORM_HEIGHT: f32 = 16.0;
    pub const BASE_PLATFORM_WIDTH: f32 = 120.0;
    pub const MAX_PLAYABLE_WIDTH: f32 = 600.0;
    /// Reference canvas width the base platform width was tuned for
    pub const REFERENCE_WIDTH: f32 = 480.0;
    pub const MAX_WIDTH_SCALE: f32 = 1.5;
    pub const MIN_WIDTH_VARIATION: f32 = 0.7;
    pub const MAX_WIDTH_VARIATION: f32 = 1.4;
    /// Extra clearance between a platform edge and the playable band edge
    pub const EDGE_CLEARANCE: f32 = 10.0;
    pub const MIN_GAP_Y: f32 = 60.0;

    /// Scroll speed (rising floor), pixels/second
    pub const INITIAL_SCROLL_SPEED: f32 = 30.0;
    pub const MAX_SCROLL_SPEED: f32 = 100.0;

    /// Vertical gap cap progression
    pub const INITIAL_MAX_GAP_Y: f32 = 80.0;
    pub const FINAL_MAX_GAP_Y: f32 = 150.0;

    /// Platform width progression
    pub const INITIAL_PLATFORM_WIDTH: f32 = 120.0;
    pub const FINAL_PLATFORM_WIDTH: f32 = 60.0;

    /// Timeline, in pixels of height climbed
    pub const PHASE_2_HEIGHT: f32 = 1000.0; // secondary colors
    pub const PHASE_3_HEIGHT: f32 = 3000.0; // white
    pub const MAX_DIFFICULTY_HEIGHT: f32 = 8000.0;
    pub const FLOOR_START_HEIGHT: f32 = 750.0; // ~10 platforms
    pub const HEIGHT_PER_PLATFORM: f32 = 75.0;

    /// Early game (tutorial-like) window
    pub const EASY_PHASE_HEIGHT: f32 = 375.0;
    pub const EASY_PHASE_SAME_COLOR_CHANCE: f64 = 0.7;
    pub const EASY_PHASE_MAX_GAP_Y: f32 = 70.0;
    pub const EASY_PHASE_MAX_X_DRIFT: f32 = 150.0;

    /// Camera margins
    pub const SPAWN_AHEAD: f32 = 800.0;
    pub const CULL_BEHIND: f32 = 100.0;

    /// How far below the screen edge the player may fall before the run ends
    pub const DEATH_MARGIN: f32 = 50.0;
    /// Landing tolerance for the contacted latch
    pub const CONTACT_EPSILON: f32 = 5.0;
}

/// Linear interpolation between `a` and `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    /// Install the panic hook and browser console logger
    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Chromask core loaded");
    }
}
