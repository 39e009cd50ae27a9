//! Star field simulation for starsaver.
//!
//! A [`StarField`] holds a fixed number of stars that drift across the
//! surface and occasionally go nova, as decided per star and per tick by
//! the [`NovaScheduler`]. The [`AnimationLoop`] paces ticks, and the
//! [`ClockOverlay`] draws the time on top of the field.

mod animation;
mod field;
mod overlay;
mod scheduler;
mod sprites;

pub use animation::AnimationLoop;
pub use field::{FieldSettings, StarField, StarFieldWidget};
pub use overlay::ClockOverlay;
pub use scheduler::NovaScheduler;
pub use sprites::{Sprite, SpriteSheet};
