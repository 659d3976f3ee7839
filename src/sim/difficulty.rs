//! Difficulty progression
//!
//! Pure functions from height climbed (pixels above the start) to scroll
//! speed, gap cap, platform width and color palette, scaled by a preset.

use serde::{Deserialize, Serialize};

use super::color::GameColor;
use crate::consts::*;
use crate::lerp;

/// Named difficulty levels, persisted as lowercase strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::VeryHard,
    ];

    /// Storage key form
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::VeryHard => "very_hard",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "Easy",
            DifficultyLevel::Medium => "Medium",
            DifficultyLevel::Hard => "Hard",
            DifficultyLevel::VeryHard => "Very Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(DifficultyLevel::Easy),
            "medium" | "med" => Some(DifficultyLevel::Medium),
            "hard" => Some(DifficultyLevel::Hard),
            "very_hard" | "very hard" | "veryhard" => Some(DifficultyLevel::VeryHard),
            _ => None,
        }
    }

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            DifficultyLevel::Easy => DifficultyPreset {
                scroll_speed_multiplier: 0.7,
                gap_multiplier: 0.85,
                same_color_chance: 0.35,
                color_phase_multiplier: 1.5,
            },
            DifficultyLevel::Medium => DifficultyPreset::default(),
            DifficultyLevel::Hard => DifficultyPreset {
                scroll_speed_multiplier: 1.3,
                gap_multiplier: 1.1,
                same_color_chance: 0.1,
                color_phase_multiplier: 0.75,
            },
            DifficultyLevel::VeryHard => DifficultyPreset {
                scroll_speed_multiplier: 1.6,
                gap_multiplier: 1.2,
                same_color_chance: 0.0,
                color_phase_multiplier: 0.5,
            },
        }
    }
}

/// Multipliers that shape the base curve for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub scroll_speed_multiplier: f32,
    pub gap_multiplier: f32,
    /// Probability of repeating the previous platform's color
    pub same_color_chance: f64,
    /// Scales the color unlock heights (smaller = earlier)
    pub color_phase_multiplier: f32,
}

impl Default for DifficultyPreset {
    fn default() -> Self {
        Self {
            scroll_speed_multiplier: 1.0,
            gap_multiplier: 1.0,
            same_color_chance: 0.2,
            color_phase_multiplier: 1.0,
        }
    }
}

/// Generation parameters for the player's current height climbed. The
/// spawner reads these for every platform it drops this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyState {
    pub height: f32,
    /// Gap cap on the general curve; the easy-phase override is the spawner's
    pub max_gap_y: f32,
    pub platform_width: f32,
}

/// Height-driven difficulty curve for one preset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DifficultyCurve {
    pub preset: DifficultyPreset,
}

/// Pixels climbed from `start_y` to `current_min_y` (y grows downward)
#[inline]
pub fn height_climbed(start_y: f32, current_min_y: f32) -> f32 {
    (start_y - current_min_y).max(0.0)
}

/// Platforms climbed for a pixel height
pub fn score_from_height(pixel_height: f32) -> u32 {
    (pixel_height.max(0.0) / HEIGHT_PER_PLATFORM).floor() as u32
}

/// Whether `height` is still inside the relaxed early window
#[inline]
pub fn is_easy_phase(height: f32) -> bool {
    height < EASY_PHASE_HEIGHT
}

/// Fraction of the full progression reached at `height`, in [0, 1]
#[inline]
fn progress(height: f32) -> f32 {
    (height / MAX_DIFFICULTY_HEIGHT).clamp(0.0, 1.0)
}

impl DifficultyCurve {
    pub fn new(preset: DifficultyPreset) -> Self {
        Self { preset }
    }

    pub fn for_level(level: DifficultyLevel) -> Self {
        Self::new(level.preset())
    }

    /// Rising floor speed in pixels/second; zero until the floor threshold
    pub fn scroll_speed(&self, height: f32) -> f32 {
        if height < FLOOR_START_HEIGHT {
            return 0.0;
        }

        let range = MAX_DIFFICULTY_HEIGHT - FLOOR_START_HEIGHT;
        let t = ((height - FLOOR_START_HEIGHT) / range).min(1.0);
        lerp(INITIAL_SCROLL_SPEED, MAX_SCROLL_SPEED, t) * self.preset.scroll_speed_multiplier
    }

    /// Largest vertical gap at `height`, easy-phase override included
    pub fn max_gap_y(&self, height: f32) -> f32 {
        if is_easy_phase(height) {
            return EASY_PHASE_MAX_GAP_Y;
        }
        self.curve_gap_y(height)
    }

    /// Gap cap on the general progression, ignoring the easy phase
    pub fn curve_gap_y(&self, height: f32) -> f32 {
        let gap = lerp(INITIAL_MAX_GAP_Y, FINAL_MAX_GAP_Y, progress(height)) * self.preset.gap_multiplier;
        gap.max(MIN_GAP_Y)
    }

    /// Unscaled platform width at `height`
    pub fn platform_width(&self, height: f32) -> f32 {
        lerp(INITIAL_PLATFORM_WIDTH, FINAL_PLATFORM_WIDTH, progress(height))
    }

    /// Colors unlocked at `height`. Each tier starts exactly at its scaled
    /// threshold; just below it the previous tier still applies.
    pub fn available_colors(&self, height: f32) -> &'static [GameColor] {
        const PRIMARIES: [GameColor; 3] = GameColor::PRIMARIES;
        const WITH_SECONDARIES: [GameColor; 6] = [
            GameColor::RED,
            GameColor::GREEN,
            GameColor::BLUE,
            GameColor::YELLOW,
            GameColor::MAGENTA,
            GameColor::CYAN,
        ];
        const ALL: [GameColor; 7] = [
            GameColor::RED,
            GameColor::GREEN,
            GameColor::BLUE,
            GameColor::YELLOW,
            GameColor::MAGENTA,
            GameColor::CYAN,
            GameColor::WHITE,
        ];

        let m = self.preset.color_phase_multiplier;
        if height < PHASE_2_HEIGHT * m {
            &PRIMARIES
        } else if height < PHASE_3_HEIGHT * m {
            &WITH_SECONDARIES
        } else {
            &ALL
        }
    }

    /// Chance of repeating the previous color at `height`
    pub fn same_color_chance(&self, height: f32) -> f64 {
        if is_easy_phase(height) {
            self.preset.same_color_chance.max(EASY_PHASE_SAME_COLOR_CHANCE)
        } else {
            self.preset.same_color_chance
        }
    }

    pub fn state_at(&self, height: f32) -> DifficultyState {
        DifficultyState {
            height,
            max_gap_y: self.curve_gap_y(height),
            platform_width: self.platform_width(height),
        }
    }
}
