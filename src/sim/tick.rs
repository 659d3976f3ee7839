//! Per-frame simulation step
//!
//! One call advances a run by one frame. The stages run in a fixed order:
//! input, color, solidity, physics and contact latch, camera, spawn and
//! cull, score, death. Spawning and culling see the camera after this
//! frame's move, and death is judged last against the final camera.

use super::color::GameColor;
use super::platform::{latch_contacts, update_solidity};
use super::state::{GameEvent, GamePhase, RunState};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    /// Jump pressed this frame (edge-triggered)
    pub jump: bool,
    /// Held color channel keys
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    /// Demo mode - the autopilot plays the run
    pub idle_mode: bool,
}

impl TickInput {
    /// Channels held as a combined color
    pub fn with_color(color: GameColor) -> Self {
        Self {
            red: color.contains(GameColor::RED),
            green: color.contains(GameColor::GREEN),
            blue: color.contains(GameColor::BLUE),
            ..Default::default()
        }
    }
}

/// Advance the run by one frame of `dt` seconds
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.frame += 1;

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    // Input
    let was_grounded = state.player.grounded;
    if state.player.apply_input(input.left, input.right, input.jump) {
        state.events.push(GameEvent::Jumped);
    }

    // Color
    state.colors.set_channels(input.red, input.green, input.blue);
    let active = state.colors.active_color();

    // Solidity
    update_solidity(state.spawner.platforms_mut(), active);

    // Physics, then latch whatever the player is now standing on
    let support = state
        .player
        .step(dt, state.spawner.platforms(), state.tuning.screen_width);
    let latched = latch_contacts(
        state.spawner.platforms_mut(),
        &state.player.bounds(),
        state.player.vel.y,
        state.player.grounded,
        state.tuning.contact_epsilon,
    );
    for platform_id in latched {
        state.events.push(GameEvent::PlatformLatched { platform_id });
    }
    if let Some(platform_id) = support.filter(|_| !was_grounded) {
        let color = state
            .spawner
            .platforms()
            .iter()
            .find(|p| p.id == platform_id)
            .map(|p| p.color)
            .unwrap_or(GameColor::NONE);
        state.events.push(GameEvent::Landed { platform_id, color });
    }

    // Camera
    let screen_height = state.tuning.screen_height;
    let update = state
        .scroll
        .update(state.player.pos.y, dt, &state.curve, screen_height);
    if update.floor_started {
        state.events.push(GameEvent::FloorStarted {
            speed: update.scroll_speed,
        });
    }
    state.difficulty = state.curve.state_at(state.scroll.height_climbed());

    // Spawn ahead of and cull behind the new camera
    state.spawner.spawn_above(state.scroll.scroll_y, &state.difficulty);
    state.spawner.cull_below(state.scroll.camera_bottom(screen_height));

    // Score
    state.score = state.scroll.score();

    // Death
    if state.player.is_below_screen(state.scroll.scroll_y, screen_height, state.tuning.death_margin) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} frames: score {} (height {:.0}px)",
            state.frame,
            state.score,
            state.scroll.height_climbed()
        );
    }
}

/// Horizontal offset to a target the autopilot will still jump for
const AUTOPILOT_MAX_JUMP_DX: f32 = 150.0;

/// Largest rise of the player's feet from a standing jump
fn jump_reach() -> f32 {
    PLAYER_JUMP_VELOCITY * PLAYER_JUMP_VELOCITY / (2.0 * PLAYER_GRAVITY)
}

/// Demo player: hop to the nearest platform above, passing through
/// everything on the way up and holding white on the way down
fn autopilot(state: &RunState) -> TickInput {
    let player = &state.player;
    let feet = player.bottom();

    let target = state
        .spawner
        .platforms()
        .iter()
        .filter(|p| !p.always_solid && p.top() < feet - 4.0 && feet - p.top() < jump_reach())
        .max_by(|a, b| a.top().total_cmp(&b.top()));

    let mut input = if player.vel.y < 0.0 {
        TickInput::default()
    } else {
        TickInput::with_color(GameColor::WHITE)
    };

    if let Some(p) = target {
        let dx = p.x - player.pos.x;
        if dx.abs() > 4.0 {
            input.left = dx < 0.0;
            input.right = dx > 0.0;
        }
        input.jump = player.grounded && dx.abs() <= AUTOPILOT_MAX_JUMP_DX;
    }

    input
}
