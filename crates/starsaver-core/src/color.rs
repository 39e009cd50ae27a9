//! RGBA colors for configurable overlays.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color as stored in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a terminal color.
    ///
    /// Terminals have no alpha channel, so alpha is applied by darkening
    /// towards black.
    pub fn to_color(self) -> Color {
        let scale = |c: u8| ((c as u16 * self.a as u16) / 255) as u8;
        Color::Rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}
