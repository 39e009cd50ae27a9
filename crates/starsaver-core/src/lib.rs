//! Core types for the starsaver star field.
//!
//! Everything here is plain data shared between the configuration layer,
//! the simulation and the terminal host: geometry, colors, font
//! descriptions, the [`Star`] record and the random source used to place
//! and ignite stars.

mod color;
mod font;
mod geometry;
mod random;
mod star;

pub use color::Rgba;
pub use font::{FontFamily, FontSpec};
pub use geometry::{CellSize, Point};
pub use random::{RandomSource, StarRng};
pub use star::{NOVA_TERMINAL_STAGE, Star};
