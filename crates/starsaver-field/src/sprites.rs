//! Stage-indexed star sprites.

use std::cell::Cell;

use ratatui::style::Color;
use tracing::warn;

/// One frame of a star: the glyph drawn and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub glyph: char,
    pub color: Color,
}

impl Sprite {
    pub const fn new(glyph: char, color: Color) -> Self {
        Self { glyph, color }
    }
}

/// Frames looked up by nova stage: index 0 is the resting star, the rest
/// are successive nova frames.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    frames: Vec<Sprite>,
    /// Stages already reported as missing, one bit per stage.
    reported_gaps: Cell<u64>,
}

impl SpriteSheet {
    pub fn new(base: Sprite, nova_frames: impl IntoIterator<Item = Sprite>) -> Self {
        let mut frames = vec![base];
        frames.extend(nova_frames);
        Self {
            frames,
            reported_gaps: Cell::new(0),
        }
    }

    /// A dim resting star that brightens and reddens as it goes nova.
    pub fn classic() -> Self {
        Self::new(
            Sprite::new('·', Color::Rgb(150, 150, 200)),
            [
                Sprite::new('+', Color::Rgb(200, 200, 255)),
                Sprite::new('*', Color::Rgb(255, 255, 220)),
                Sprite::new('✦', Color::Rgb(255, 220, 120)),
                Sprite::new('✧', Color::Rgb(255, 140, 60)),
            ],
        )
    }

    /// Frame for `stage`, falling back to the base frame when missing.
    ///
    /// Each missing stage is logged once.
    pub fn frame(&self, stage: u8) -> &Sprite {
        if let Some(sprite) = self.frames.get(stage as usize) {
            return sprite;
        }
        let bit = 1u64 << (stage % 64);
        let reported = self.reported_gaps.get();
        if reported & bit == 0 {
            warn!(stage, "no sprite frame for nova stage, drawing base frame");
            self.reported_gaps.set(reported | bit);
        }
        &self.frames[0]
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::classic()
    }
}
