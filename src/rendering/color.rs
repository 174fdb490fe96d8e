//! # Colors
//!
//! RGB palette shared by the simulation (actor and message colors) and the
//! front ends that draw them.

use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LIGHT_GREY: Color = Color::rgb(159, 159, 159);
    pub const SILVER: Color = Color::rgb(203, 203, 203);

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(191, 0, 0);
    pub const CRIMSON: Color = Color::rgb(255, 0, 63);
    pub const FLAME: Color = Color::rgb(255, 63, 0);
    pub const DARKER_FLAME: Color = Color::rgb(127, 31, 0);
    pub const ORANGE: Color = Color::rgb(255, 127, 0);
    pub const DARKER_ORANGE: Color = Color::rgb(127, 63, 0);
    pub const AMBER: Color = Color::rgb(255, 191, 0);

    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const LIGHT_YELLOW: Color = Color::rgb(255, 255, 115);
    pub const CHARTREUSE: Color = Color::rgb(191, 255, 0);

    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const LIGHT_GREEN: Color = Color::rgb(115, 255, 115);
    pub const DESATURATED_SEA: Color = Color::rgb(63, 127, 95);
    pub const DARK_SEA: Color = Color::rgb(0, 191, 95);
    pub const DARKER_SEA: Color = Color::rgb(0, 127, 63);

    pub const LIGHT_CYAN: Color = Color::rgb(115, 255, 255);
    pub const SKY: Color = Color::rgb(0, 191, 255);
    pub const LIGHT_BLUE: Color = Color::rgb(115, 115, 255);
    pub const LIGHT_VIOLET: Color = Color::rgb(185, 115, 255);

    /// Wall outside the visible set
    pub const DARK_WALL: Color = Color::rgb(0, 15, 31);
    /// Wall inside the visible set
    pub const LIGHT_WALL: Color = Color::rgb(127, 95, 63);
    /// Floor outside the visible set
    pub const DARK_GROUND: Color = Color::rgb(0, 63, 127);
    /// Floor inside the visible set
    pub const LIGHT_GROUND: Color = Color::rgb(127, 111, 63);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
