//! Game scene lifecycle
//!
//! The host calls `on_create` to start a run and `on_frame` once per
//! animation frame. A finished run reports its outcome exactly once; the
//! next `on_create` replaces the whole run state.

use crate::consts::MAX_FRAME_DT;
use crate::sim::{DifficultyLevel, GameEvent, RunState, TickInput, tick};
use crate::tuning::Tuning;
use crate::view::{FrameView, Presenter};

/// Outcome handed back when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
}

pub struct GameScene<P: Presenter> {
    level: DifficultyLevel,
    tuning: Tuning,
    base_seed: u64,
    runs: u64,
    run: Option<RunState>,
    presenter: P,
    events: Vec<GameEvent>,
}

impl<P: Presenter> GameScene<P> {
    pub fn new(level: DifficultyLevel, tuning: Tuning, seed: u64, presenter: P) -> Self {
        Self {
            level,
            tuning,
            base_seed: seed,
            runs: 0,
            run: None,
            presenter,
            events: Vec::new(),
        }
    }

    /// Start a fresh run, discarding any previous one
    pub fn on_create(&mut self) {
        let seed = self
            .base_seed
            .wrapping_add(self.runs.wrapping_mul(2654435761));
        self.runs += 1;
        self.events.clear();
        self.run = Some(RunState::new(seed, self.level, self.tuning));
    }

    /// Advance one frame. `delta_ms` is clamped so a stalled tab cannot
    /// teleport the player. Returns the outcome on the frame the run ends.
    pub fn on_frame(&mut self, delta_ms: f32, input: &TickInput) -> Option<GameOver> {
        let Some(run) = self.run.as_mut() else {
            log::warn!("on_frame called before on_create");
            return None;
        };
        if run.is_over() {
            return None;
        }

        let dt = (delta_ms / 1000.0).clamp(0.0, MAX_FRAME_DT);
        tick(run, input, dt);
        self.presenter.present(&FrameView::capture(run));

        let mut outcome = None;
        for event in run.drain_events() {
            if let GameEvent::GameOver { score } = event {
                outcome = Some(GameOver { score });
            }
            self.events.push(event);
        }
        outcome
    }

    pub fn state(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    /// Difficulty used from the next `on_create`
    pub fn set_level(&mut self, level: DifficultyLevel) {
        self.level = level;
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
