//! Data-driven tunables
//!
//! The handful of values that depend on the host (canvas size) or that are
//! tuning knobs rather than laws (contact tolerance, death margin).

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Canvas width in pixels
    pub screen_width: f32,
    /// Canvas height in pixels
    pub screen_height: f32,
    /// How close the player's feet must be to a platform top to latch it
    pub contact_epsilon: f32,
    /// Distance below the screen the player may fall before dying
    pub death_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            contact_epsilon: CONTACT_EPSILON,
            death_margin: DEATH_MARGIN,
        }
    }
}

impl Tuning {
    /// Tuning for a non-default canvas size
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Parse tuning overrides; missing fields keep their defaults and a
    /// malformed payload falls back to the defaults entirely
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) if tuning.is_sane() => tuning,
            Ok(_) => {
                log::warn!("Tuning values out of range, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    fn is_sane(&self) -> bool {
        self.screen_width > 0.0
            && self.screen_height > 0.0
            && self.contact_epsilon >= 0.0
            && self.death_margin >= 0.0
    }
}
