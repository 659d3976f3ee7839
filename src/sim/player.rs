//! Arcade player body
//!
//! Constant-speed horizontal movement, impulse jump, constant gravity.
//! Collision is resolved one axis at a time against the solid platforms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::platform::{Aabb, Platform};
use crate::consts::*;

/// The climbing player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Standing on a solid platform after the last step
    pub grounded: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            grounded: false,
        }
    }

    /// Player resting on a surface whose top edge is at `surface_y`
    pub fn standing_on(x: f32, surface_y: f32) -> Self {
        Self::new(x, surface_y - PLAYER_HEIGHT / 2.0 - 1.0)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_HEIGHT / 2.0
    }

    /// Apply held/pressed input. Left wins over right. Jumping only works
    /// from the ground; returns true if a jump started.
    pub fn apply_input(&mut self, left: bool, right: bool, jump: bool) -> bool {
        self.vel.x = if left {
            -PLAYER_MOVE_SPEED
        } else if right {
            PLAYER_MOVE_SPEED
        } else {
            0.0
        };

        if jump && self.grounded {
            self.vel.y = PLAYER_JUMP_VELOCITY;
            self.grounded = false;
            return true;
        }
        false
    }

    /// Integrate one step and collide against solid platforms.
    /// Returns the id of the platform supporting the player, if any.
    pub fn step(&mut self, dt: f32, platforms: &[Platform], screen_width: f32) -> Option<u32> {
        self.vel.y += PLAYER_GRAVITY * dt;

        // X
        let before = self.bounds();
        let dx = self.vel.x * dt;
        self.pos.x = (self.pos.x + dx).clamp(PLAYER_WIDTH / 2.0, screen_width - PLAYER_WIDTH / 2.0);
        for p in platforms.iter().filter(|p| p.solid) {
            let pb = p.bounds();
            // A platform that turned solid around the player does not trap it
            if before.intersects(&pb) || !self.bounds().intersects(&pb) {
                continue;
            }
            if dx > 0.0 {
                self.pos.x = pb.left() - PLAYER_WIDTH / 2.0;
            } else if dx < 0.0 {
                self.pos.x = pb.right() + PLAYER_WIDTH / 2.0;
            }
        }

        // Y, swept so fast falls cannot tunnel through a 16px platform
        let before = self.bounds();
        let dy = self.vel.y * dt;
        self.pos.y += dy;
        let after = self.bounds();
        self.grounded = false;

        if dy > 0.0 {
            let landing = platforms
                .iter()
                .filter(|p| p.solid && before.overlaps_x(&p.bounds()))
                .filter(|p| before.bottom() <= p.top() && after.bottom() >= p.top())
                .min_by(|a, b| a.top().total_cmp(&b.top()));
            if let Some(p) = landing {
                self.pos.y = p.top() - PLAYER_HEIGHT / 2.0;
                self.vel.y = 0.0;
                self.grounded = true;
                return Some(p.id);
            }
        } else if dy < 0.0 {
            let ceiling = platforms
                .iter()
                .filter(|p| p.solid && before.overlaps_x(&p.bounds()))
                .filter(|p| {
                    let pb = p.bounds();
                    before.top() >= pb.bottom() && after.top() <= pb.bottom()
                })
                .max_by(|a, b| a.bounds().bottom().total_cmp(&b.bounds().bottom()));
            if let Some(p) = ceiling {
                self.pos.y = p.bounds().bottom() + PLAYER_HEIGHT / 2.0;
                self.vel.y = 0.0;
            }
        }

        None
    }

    /// Fell past the bottom of the screen plus `margin`
    pub fn is_below_screen(&self, scroll_y: f32, screen_height: f32, margin: f32) -> bool {
        self.pos.y > scroll_y + screen_height + margin
    }
}
