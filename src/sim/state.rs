//! Run state and core simulation types
//!
//! Everything a single climb owns lives in `RunState`. A new game builds a
//! fresh one; nothing is reset field by field.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{ColorState, GameColor};
use super::difficulty::{DifficultyCurve, DifficultyLevel, DifficultyState};
use super::player::Player;
use super::scroll::ScrollState;
use super::spawner::PlatformSpawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Climbing
    Playing,
    /// Fell off the bottom of the screen
    GameOver,
}

/// Things that happened during a tick, for the audio and presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Touched down on a platform after being airborne
    Landed { platform_id: u32, color: GameColor },
    /// A platform was stood on for the first time and is now locked solid
    PlatformLatched { platform_id: u32 },
    /// The rising floor engaged
    FloorStarted { speed: f32 },
    GameOver { score: u32 },
}

/// RNG state wrapper so a run can be replayed from its seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream)
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub rng_state: RngState,
    pub level: DifficultyLevel,
    pub curve: DifficultyCurve,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub colors: ColorState,
    pub scroll: ScrollState,
    pub spawner: PlatformSpawner,
    pub player: Player,
    /// Generation parameters at the current best height
    pub difficulty: DifficultyState,
    /// Platforms climbed (never decreases)
    pub score: u32,
    pub frame: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl RunState {
    /// Build a fresh run: ground, prefilled platforms, player on the ground
    pub fn new(seed: u64, level: DifficultyLevel, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        let curve = DifficultyCurve::for_level(level);

        let mut spawner = PlatformSpawner::new(curve, &tuning, rng_state.to_rng());
        spawner.create_initial_platforms();

        let ground_top = spawner.ground_top();
        let start_y = ground_top - PLAYER_HEIGHT / 2.0;
        let player = Player::standing_on(tuning.screen_width / 2.0, ground_top);

        log::info!(
            "New run: seed={}, difficulty={}, {} platforms prefilled",
            seed,
            level.label(),
            spawner.platforms().len()
        );

        Self {
            rng_state,
            level,
            curve,
            tuning,
            phase: GamePhase::Playing,
            colors: ColorState::new(),
            scroll: ScrollState::new(start_y),
            spawner,
            player,
            difficulty: curve.state_at(0.0),
            score: 0,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let state = RunState::new(12345, DifficultyLevel::Medium, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.colors.active_color(), GameColor::NONE);
        assert!(!state.scroll.floor_started);
        assert_eq!(state.scroll.scroll_y, 0.0);

        let ground = &state.spawner.platforms()[0];
        assert!(ground.always_solid);
        // Player starts just above the ground
        assert!(state.player.bottom() < ground.top());
        assert!(ground.top() - state.player.bottom() <= 1.0 + 1e-3);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = RunState::new(7, DifficultyLevel::Hard, Tuning::default());
        let b = RunState::new(7, DifficultyLevel::Hard, Tuning::default());
        let c = RunState::new(8, DifficultyLevel::Hard, Tuning::default());
        let xs = |s: &RunState| s.spawner.platforms().iter().map(|p| p.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
        assert_ne!(xs(&a), xs(&c));
    }

    #[test]
    fn test_prefill_uses_starting_difficulty() {
        for seed in 0..50 {
            let state = RunState::new(seed, DifficultyLevel::Medium, Tuning::default());
            assert_eq!(state.scroll.height_climbed(), 0.0);
            assert_eq!(state.difficulty.max_gap_y, INITIAL_MAX_GAP_Y);

            let mut prev_y = state.spawner.ground_top();
            for p in state.spawner.platforms().iter().filter(|p| !p.always_solid) {
                let gap = prev_y - p.y;
                assert!(gap <= INITIAL_MAX_GAP_Y + 1e-3, "seed {seed}: gap {gap}");
                prev_y = p.y;
            }
        }
    }

    #[test]
    fn test_drain_events() {
        let mut state = RunState::new(1, DifficultyLevel::Easy, Tuning::default());
        state.events.push(GameEvent::Jumped);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.drain_events().is_empty());
    }
}
