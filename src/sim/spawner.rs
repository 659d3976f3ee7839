//! Procedural platform generation
//!
//! A single frontier cursor walks upward ahead of the camera, dropping one
//! platform per step. Gap cap and width follow the player's progress; the
//! easy-phase overrides and the color palette follow the spawn height.
//! Platforms that fall far enough behind the camera are culled, so the live
//! set stays bounded no matter how high the run goes.

use rand::Rng;
use rand_pcg::Pcg32;

use super::color::GameColor;
use super::difficulty::{DifficultyCurve, DifficultyState, is_easy_phase};
use super::platform::Platform;
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal range platforms may be centered in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayableBand {
    pub min_x: f32,
    pub max_x: f32,
}

impl PlayableBand {
    /// Centered band, at most `MAX_PLAYABLE_WIDTH` wide
    pub fn for_screen(screen_width: f32) -> Self {
        let playable = screen_width.min(MAX_PLAYABLE_WIDTH);
        let side_margin = (screen_width - playable) / 2.0;
        Self {
            min_x: side_margin,
            max_x: screen_width - side_margin,
        }
    }
}

/// Owns the live platform set and the generation cursor
#[derive(Debug, Clone)]
pub struct PlatformSpawner {
    curve: DifficultyCurve,
    rng: Pcg32,
    screen_width: f32,
    screen_height: f32,
    band: PlayableBand,
    /// Base width scale relative to the reference canvas
    width_scale: f32,
    /// y of the most recently spawned platform (always the topmost)
    last_spawn_y: f32,
    last_spawn_x: f32,
    last_color: GameColor,
    /// Live platforms, in spawn order (ascending id)
    platforms: Vec<Platform>,
    next_id: u32,
}

impl PlatformSpawner {
    pub fn new(curve: DifficultyCurve, tuning: &Tuning, rng: Pcg32) -> Self {
        let screen_width = tuning.screen_width;
        Self {
            curve,
            rng,
            screen_width,
            screen_height: tuning.screen_height,
            band: PlayableBand::for_screen(screen_width),
            width_scale: (screen_width / REFERENCE_WIDTH).min(MAX_WIDTH_SCALE),
            last_spawn_y: tuning.screen_height - PLATFORM_HEIGHT,
            last_spawn_x: screen_width / 2.0,
            last_color: GameColor::RED,
            platforms: Vec::new(),
            next_id: 1,
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Mutable access for the solidity engine; creation and removal stay here
    pub fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    pub fn last_spawn_y(&self) -> f32 {
        self.last_spawn_y
    }

    pub fn band(&self) -> PlayableBand {
        self.band
    }

    /// y of the ground platform's top edge; spawn heights are measured from it
    pub fn ground_top(&self) -> f32 {
        self.screen_height - PLATFORM_HEIGHT
    }

    /// Height of a world y above the ground
    fn spawn_height(&self, y: f32) -> f32 {
        (self.ground_top() - y).max(0.0)
    }

    /// Base (unvaried) platform width for the current difficulty
    fn base_width(&self, difficulty: &DifficultyState) -> f32 {
        difficulty.platform_width * self.width_scale
    }

    /// Gap cap for the step above a cursor at `spawn_height`
    fn gap_cap(&self, spawn_height: f32, difficulty: &DifficultyState) -> f32 {
        if is_easy_phase(spawn_height) {
            EASY_PHASE_MAX_GAP_Y
        } else {
            difficulty.max_gap_y.max(MIN_GAP_Y)
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay the ground and prefill the visible and look-ahead region
    pub fn create_initial_platforms(&mut self) {
        let id = self.allocate_id();
        self.platforms.push(Platform::ground(
            id,
            self.screen_width / 2.0,
            self.screen_height - PLATFORM_HEIGHT / 2.0,
            self.screen_width,
        ));
        self.last_spawn_y = self.ground_top();
        self.last_spawn_x = self.screen_width / 2.0;
        let start = self.curve.state_at(0.0);
        self.spawn_above(0.0, &start);
    }

    /// Spawn until the cursor is `SPAWN_AHEAD` above `camera_top_y`, using
    /// `difficulty` for the player's progress. Returns the number created.
    pub fn spawn_above(&mut self, camera_top_y: f32, difficulty: &DifficultyState) -> usize {
        let spawn_until = camera_top_y - SPAWN_AHEAD;
        let mut spawned = 0;

        while self.last_spawn_y > spawn_until {
            let max_gap = self.gap_cap(self.spawn_height(self.last_spawn_y), difficulty);
            let gap = self.rng.random_range(MIN_GAP_Y..=max_gap);
            self.last_spawn_y -= gap;

            let height = self.spawn_height(self.last_spawn_y);
            let x = self.pick_x(height, difficulty);
            let color = self.pick_color(height);
            let variation = self.rng.random_range(MIN_WIDTH_VARIATION..=MAX_WIDTH_VARIATION);
            let width = (self.base_width(difficulty) * variation).round();

            let id = self.allocate_id();
            self.platforms.push(Platform::new(id, x, self.last_spawn_y, width, color));

            self.last_spawn_x = x;
            self.last_color = color;
            spawned += 1;
        }

        if spawned > 0 {
            log::debug!(
                "Spawned {} platforms, frontier y={:.0}, live={}",
                spawned,
                self.last_spawn_y,
                self.platforms.len()
            );
        }
        spawned
    }

    /// Remove every platform lower than `CULL_BEHIND` past `camera_bottom_y`.
    /// Returns the number removed.
    pub fn cull_below(&mut self, camera_bottom_y: f32) -> usize {
        let cull_y = camera_bottom_y + CULL_BEHIND;
        let before = self.platforms.len();
        self.platforms.retain(|p| p.y <= cull_y);
        let culled = before - self.platforms.len();
        if culled > 0 {
            log::debug!("Culled {} platforms below y={:.0}", culled, cull_y);
        }
        culled
    }

    /// Horizontal position for a new platform, always inside the band
    fn pick_x(&mut self, height: f32, difficulty: &DifficultyState) -> f32 {
        let margin = self.base_width(difficulty) / 2.0 + EDGE_CLEARANCE;
        let min_bound = self.band.min_x + margin;
        let max_bound = (self.band.max_x - margin).max(min_bound);

        let (lo, hi) = if is_easy_phase(height) {
            let lo = (self.last_spawn_x - EASY_PHASE_MAX_X_DRIFT).max(min_bound);
            let hi = (self.last_spawn_x + EASY_PHASE_MAX_X_DRIFT).min(max_bound);
            if lo <= hi { (lo, hi) } else { (min_bound, max_bound) }
        } else {
            (min_bound, max_bound)
        };

        self.rng.random_range(lo..=hi).clamp(min_bound, max_bound).round()
    }

    /// Color for a new platform; may repeat the previous one
    fn pick_color(&mut self, height: f32) -> GameColor {
        let colors = self.curve.available_colors(height);
        let chance = self.curve.same_color_chance(height);

        if chance > 0.0 && self.rng.random_bool(chance.min(1.0)) && colors.contains(&self.last_color) {
            return self.last_color;
        }

        colors[self.rng.random_range(0..colors.len())]
    }
}
