//! A single animated star.

use ratatui::layout::Size;

use crate::geometry::Point;

/// Stage at which a nova has burnt out and the star respawns.
///
/// Stage 0 is the resting star, stages `1..NOVA_TERMINAL_STAGE` are the
/// visible nova frames.
pub const NOVA_TERMINAL_STAGE: u8 = 5;

/// One star: where it is, how it drifts and how far into a nova it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    /// Top-left corner of the star's cell, in terminal cells.
    pub position: Point,
    /// Displacement applied on every drift step.
    pub drift: Point,
    /// Current nova stage, `0` while resting.
    pub nova_stage: u8,
}

impl Star {
    /// A resting star.
    pub const fn new(position: Point, drift: Point) -> Self {
        Self {
            position,
            drift,
            nova_stage: 0,
        }
    }

    /// Whether the star is somewhere in its nova sequence.
    pub fn is_nova(&self) -> bool {
        self.nova_stage > 0
    }

    /// Begin a nova. Returns `false` if one is already running.
    pub fn ignite(&mut self) -> bool {
        if self.is_nova() {
            return false;
        }
        self.nova_stage = 1;
        true
    }

    /// Move one nova stage forward.
    ///
    /// Returns `true` when the terminal stage has been reached; the caller
    /// is expected to respawn the star. Resting stars are left alone.
    pub fn advance_nova(&mut self) -> bool {
        if !self.is_nova() {
            return false;
        }
        self.nova_stage += 1;
        self.nova_stage >= NOVA_TERMINAL_STAGE
    }

    /// Apply the drift offset, wrapping at `bounds`.
    pub fn drift_within(&mut self, bounds: Size) {
        self.position = self.position.wrapping_offset(self.drift, bounds);
    }
}
