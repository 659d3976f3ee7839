//! Camera and rising floor
//!
//! The camera follows the player upward but never back down. Once the run
//! has climbed past the floor threshold a forced scroll starts pushing the
//! camera up on its own; its speed only ever ratchets higher.

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyCurve, height_climbed, score_from_height};

/// Per-run camera state. All y values grow downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollState {
    /// Player y the run is measured from
    pub start_y: f32,
    /// Smallest (highest) player y reached
    pub highest_y: f32,
    /// Camera top edge
    pub scroll_y: f32,
    /// Lowest position the camera may sit at once the floor is rising
    pub forced_scroll_y: f32,
    pub floor_started: bool,
    /// Ratchet: never decreases within a run
    pub max_scroll_speed_so_far: f32,
}

/// What changed during one camera update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollUpdate {
    /// The rising floor engaged on this update
    pub floor_started: bool,
    /// Speed the floor moved at this update
    pub scroll_speed: f32,
}

impl ScrollState {
    pub fn new(start_y: f32) -> Self {
        Self {
            start_y,
            highest_y: start_y,
            scroll_y: 0.0,
            forced_scroll_y: 0.0,
            floor_started: false,
            max_scroll_speed_so_far: 0.0,
        }
    }

    /// Pixels climbed so far, by best height
    pub fn height_climbed(&self) -> f32 {
        height_climbed(self.start_y, self.highest_y)
    }

    /// Platforms climbed so far
    pub fn score(&self) -> u32 {
        score_from_height(self.height_climbed())
    }

    /// Bottom edge of the camera
    pub fn camera_bottom(&self, screen_height: f32) -> f32 {
        self.scroll_y + screen_height
    }

    /// Advance the camera one frame
    pub fn update(
        &mut self,
        player_y: f32,
        dt: f32,
        curve: &DifficultyCurve,
        screen_height: f32,
    ) -> ScrollUpdate {
        let mut result = ScrollUpdate::default();

        self.highest_y = self.highest_y.min(player_y);

        let base_speed = curve.scroll_speed(self.height_climbed());
        self.max_scroll_speed_so_far = self.max_scroll_speed_so_far.max(base_speed);
        let speed = self.max_scroll_speed_so_far;

        if speed > 0.0 && !self.floor_started {
            self.floor_started = true;
            self.forced_scroll_y = self.scroll_y;
            result.floor_started = true;
            log::info!(
                "Rising floor started at height {:.0} ({:.1} px/s)",
                self.height_climbed(),
                speed
            );
        }

        if self.floor_started {
            self.forced_scroll_y -= speed * dt;
            result.scroll_speed = speed;
        }

        let target = player_y - screen_height / 2.0;
        let ratcheted = target.min(self.scroll_y);
        let final_scroll = if self.floor_started {
            ratcheted.min(self.forced_scroll_y)
        } else {
            ratcheted
        };
        self.scroll_y = final_scroll;

        // Keep the floor caught up when the player jumps ahead of it
        if self.floor_started && self.forced_scroll_y > final_scroll {
            self.forced_scroll_y = final_scroll;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{DifficultyLevel, Player};
    use proptest::prelude::*;

    const START_Y: f32 = SCREEN_HEIGHT - PLATFORM_HEIGHT - PLAYER_HEIGHT / 2.0;

    fn curve() -> DifficultyCurve {
        DifficultyCurve::for_level(DifficultyLevel::Medium)
    }

    #[test]
    fn test_camera_holds_at_start() {
        let mut scroll = ScrollState::new(START_Y);
        for _ in 0..60 {
            scroll.update(START_Y, SIM_DT, &curve(), SCREEN_HEIGHT);
        }
        assert_eq!(scroll.scroll_y, 0.0);
        assert!(!scroll.floor_started);
        assert_eq!(scroll.score(), 0);
    }

    #[test]
    fn test_camera_follows_upward_only() {
        let mut scroll = ScrollState::new(START_Y);
        scroll.update(START_Y - 600.0, SIM_DT, &curve(), SCREEN_HEIGHT);
        let up = scroll.scroll_y;
        assert_eq!(up, START_Y - 600.0 - SCREEN_HEIGHT / 2.0);

        // Falling back down does not pull the camera with it
        scroll.update(START_Y, SIM_DT, &curve(), SCREEN_HEIGHT);
        assert_eq!(scroll.scroll_y, up);
        assert_eq!(scroll.highest_y, START_Y - 600.0);
    }

    #[test]
    fn test_floor_starts_at_threshold_and_rises() {
        let mut scroll = ScrollState::new(START_Y);
        let player_y = START_Y - FLOOR_START_HEIGHT;
        let update = scroll.update(player_y, 1.0, &curve(), SCREEN_HEIGHT);
        assert!(update.floor_started);
        assert!(scroll.floor_started);
        assert_eq!(scroll.max_scroll_speed_so_far, INITIAL_SCROLL_SPEED);

        // Player idles; the floor keeps pushing the camera up
        let before = scroll.scroll_y;
        let update = scroll.update(player_y, 1.0, &curve(), SCREEN_HEIGHT);
        assert!(!update.floor_started);
        assert!((scroll.scroll_y - (before - INITIAL_SCROLL_SPEED)).abs() < 1e-3);
        assert_eq!(scroll.forced_scroll_y, scroll.scroll_y);
    }

    #[test]
    fn test_idle_player_eventually_dies() {
        let mut scroll = ScrollState::new(START_Y);
        let player = Player::new(SCREEN_WIDTH / 2.0, START_Y - FLOOR_START_HEIGHT);
        let mut dead = false;
        for _ in 0..(60 * 60) {
            scroll.update(player.pos.y, SIM_DT, &curve(), SCREEN_HEIGHT);
            if player.is_below_screen(scroll.scroll_y, SCREEN_HEIGHT, DEATH_MARGIN) {
                dead = true;
                break;
            }
        }
        assert!(dead);
        assert_eq!(scroll.score(), 10);
    }

    #[test]
    fn test_catch_up_snap() {
        let mut scroll = ScrollState::new(START_Y);
        let player_y = START_Y - FLOOR_START_HEIGHT;
        scroll.update(player_y, SIM_DT, &curve(), SCREEN_HEIGHT);
        scroll.update(player_y, SIM_DT, &curve(), SCREEN_HEIGHT);
        let stale_floor = scroll.forced_scroll_y;

        // Player leaps 1000px above the frontier between two frames
        let leap_y = player_y - 1000.0;
        scroll.update(leap_y, SIM_DT, &curve(), SCREEN_HEIGHT);
        let final_scroll = leap_y - SCREEN_HEIGHT / 2.0;
        assert_eq!(scroll.scroll_y, final_scroll);
        assert_eq!(scroll.forced_scroll_y, final_scroll);
        assert!(scroll.forced_scroll_y < stale_floor);
    }

    #[test]
    fn test_speed_ratchet_survives_height_loss() {
        let mut scroll = ScrollState::new(START_Y);
        scroll.update(START_Y - 4000.0, SIM_DT, &curve(), SCREEN_HEIGHT);
        let fast = scroll.max_scroll_speed_so_far;
        assert!(fast > INITIAL_SCROLL_SPEED);
        scroll.update(START_Y, SIM_DT, &curve(), SCREEN_HEIGHT);
        assert_eq!(scroll.max_scroll_speed_so_far, fast);
    }

    proptest! {
        #[test]
        fn prop_scroll_invariants(moves in proptest::collection::vec(-400.0f32..200.0, 1..200)) {
            let mut scroll = ScrollState::new(START_Y);
            let mut player_y = START_Y;
            let mut prev_speed = 0.0f32;
            let mut prev_scroll = scroll.scroll_y;
            let mut prev_forced: Option<f32> = None;

            for dy in moves {
                player_y += dy;
                scroll.update(player_y, SIM_DT, &curve(), SCREEN_HEIGHT);

                prop_assert!(scroll.max_scroll_speed_so_far >= prev_speed);
                prop_assert!(scroll.scroll_y <= prev_scroll);
                if let Some(prev) = prev_forced {
                    prop_assert!(scroll.forced_scroll_y <= prev);
                }
                if scroll.floor_started {
                    prop_assert!(scroll.forced_scroll_y >= scroll.scroll_y);
                    prev_forced = Some(scroll.forced_scroll_y);
                }

                prev_speed = scroll.max_scroll_speed_so_far;
                prev_scroll = scroll.scroll_y;
            }
        }
    }
}
