//! Additive color channels
//!
//! Colors are three bit flags (R=1, G=2, B=4) combined with bitwise OR.
//! A platform is passable unless every bit of its color is held.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// A color in the 3-bit RGB space. Every value in [0, 7] is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct GameColor(u8);

impl GameColor {
    pub const NONE: GameColor = GameColor(0b000);
    pub const RED: GameColor = GameColor(0b001);
    pub const GREEN: GameColor = GameColor(0b010);
    pub const BLUE: GameColor = GameColor(0b100);
    pub const YELLOW: GameColor = GameColor(0b011);
    pub const MAGENTA: GameColor = GameColor(0b101);
    pub const CYAN: GameColor = GameColor(0b110);
    pub const WHITE: GameColor = GameColor(0b111);

    pub const PRIMARIES: [GameColor; 3] = [Self::RED, Self::GREEN, Self::BLUE];
    pub const SECONDARIES: [GameColor; 3] = [Self::YELLOW, Self::MAGENTA, Self::CYAN];

    /// Build a color from raw bits; anything above bit 2 is dropped
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        GameColor(bits & 0b111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is present in `self`
    #[inline]
    pub const fn contains(self, other: GameColor) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "none",
            1 => "red",
            2 => "green",
            3 => "yellow",
            4 => "blue",
            5 => "magenta",
            6 => "cyan",
            _ => "white",
        }
    }
}

impl BitOr for GameColor {
    type Output = GameColor;

    fn bitor(self, rhs: GameColor) -> GameColor {
        GameColor(self.0 | rhs.0)
    }
}

/// Held color channels, driven every frame from key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorState {
    pub red_on: bool,
    pub green_on: bool,
    pub blue_on: bool,
}

impl ColorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channels directly from "is this key down" (level-driven)
    pub fn set_channels(&mut self, red: bool, green: bool, blue: bool) {
        self.red_on = red;
        self.green_on = green;
        self.blue_on = blue;
    }

    /// OR-combination of the held channels
    pub fn active_color(&self) -> GameColor {
        let mut color = GameColor::NONE;
        if self.red_on {
            color = color | GameColor::RED;
        }
        if self.green_on {
            color = color | GameColor::GREEN;
        }
        if self.blue_on {
            color = color | GameColor::BLUE;
        }
        color
    }

    /// Whether a platform of `color` is currently solid
    pub fn is_color_active(&self, color: GameColor) -> bool {
        self.active_color().contains(color)
    }
}
