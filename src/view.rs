//! Presentation seam
//!
//! The simulation never touches a renderer. Each frame the scene captures a
//! plain-data snapshot and hands it to whatever `Presenter` the host plugged in.

use glam::Vec2;

use crate::sim::{GameColor, GamePhase, Platform, RunState};

/// Alpha for platforms the player would pass through
pub const PLATFORM_INACTIVE_ALPHA: f32 = 0.3;
/// Alpha for solid platforms
pub const PLATFORM_ACTIVE_ALPHA: f32 = 1.0;

/// One platform as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformView {
    pub id: u32,
    /// Center, in world space
    pub pos: Vec2,
    pub width: f32,
    pub color: GameColor,
    pub solid: bool,
    /// Draw the faint outline of a passable platform
    pub outlined: bool,
    pub alpha: f32,
}

impl From<&Platform> for PlatformView {
    fn from(p: &Platform) -> Self {
        Self {
            id: p.id,
            pos: Vec2::new(p.x, p.y),
            width: p.width,
            color: p.color,
            solid: p.solid,
            outlined: !p.solid && !p.always_solid,
            alpha: if p.solid {
                PLATFORM_ACTIVE_ALPHA
            } else {
                PLATFORM_INACTIVE_ALPHA
            },
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub frame: u64,
    /// Camera top edge in world space
    pub camera_y: f32,
    pub player_pos: Vec2,
    pub active_color: GameColor,
    pub platforms: Vec<PlatformView>,
    /// Platforms climbed, for the HUD
    pub score: u32,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &RunState) -> Self {
        Self {
            frame: state.frame,
            camera_y: state.scroll.scroll_y,
            player_pos: state.player.pos,
            active_color: state.colors.active_color(),
            platforms: state.spawner.platforms().iter().map(PlatformView::from).collect(),
            score: state.score,
            game_over: state.phase == GamePhase::GameOver,
        }
    }

    /// Player position relative to the camera
    pub fn player_screen_pos(&self) -> Vec2 {
        self.player_pos - Vec2::new(0.0, self.camera_y)
    }
}

/// Receives a snapshot once per frame
pub trait Presenter {
    fn present(&mut self, frame: &FrameView);
}

/// Discards every frame (headless runs)
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &FrameView) {}
}
