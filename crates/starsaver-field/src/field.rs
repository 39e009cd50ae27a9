//! The star field: placement grid, drift, nova escalation and respawn.

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    widgets::Widget,
};
use starsaver_config::Configuration;
use starsaver_core::{CellSize, Point, RandomSource, Star, StarRng};
use tracing::{debug, trace};

use crate::scheduler::NovaScheduler;
use crate::sprites::SpriteSheet;

/// The eight unit drift directions; a star never stands still.
const DRIFT_DIRECTIONS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

/// The part of the configuration the field is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSettings {
    pub number_of_stars: usize,
    pub nova_probability: i64,
    pub ticks_before_move: u32,
    pub star_size: CellSize,
}

impl From<&Configuration> for FieldSettings {
    fn from(config: &Configuration) -> Self {
        Self {
            number_of_stars: config.number_of_stars as usize,
            nova_probability: config.nova_probability,
            ticks_before_move: config.ticks_before_move,
            star_size: config.star_size,
        }
    }
}

/// A fixed-size field of stars on a surface of known size.
#[derive(Debug)]
pub struct StarField<R = StarRng> {
    /// Stars in stable index order. Never grows or shrinks.
    stars: Vec<Star>,
    bounds: Size,
    settings: FieldSettings,
    cols: u16,
    rows: u16,
    scheduler: NovaScheduler,
    rng: R,
}

impl<R: RandomSource> StarField<R> {
    /// Lay out the placement grid for `bounds` and scatter the stars.
    pub fn new(bounds: Size, settings: FieldSettings, rng: R) -> Self {
        let mut field = Self {
            stars: Vec::with_capacity(settings.number_of_stars),
            bounds,
            settings,
            cols: 0,
            rows: 0,
            scheduler: NovaScheduler::new(settings.nova_probability),
            rng,
        };
        field.populate();
        field
    }

    /// Rebuild the grid and re-place every star if the surface changed size.
    ///
    /// Returns whether a rebuild happened.
    pub fn fit_to(&mut self, bounds: Size) -> bool {
        if bounds == self.bounds {
            return false;
        }
        debug!(
            from = ?self.bounds,
            to = ?bounds,
            "surface resized, rebuilding star field"
        );
        self.bounds = bounds;
        self.populate();
        true
    }

    /// Apply new settings and re-place every star on the current surface.
    pub fn reconfigure(&mut self, settings: FieldSettings) {
        debug!(?settings, "star field reconfigured");
        self.settings = settings;
        self.scheduler = NovaScheduler::new(settings.nova_probability);
        self.populate();
    }

    fn populate(&mut self) {
        let (cols, rows) = self.settings.star_size.grid(self.bounds);
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.stars.clear();
        for _ in 0..self.settings.number_of_stars {
            let star = self.spawn_star();
            self.stars.push(star);
        }
        debug!(
            stars = self.stars.len(),
            cols = self.cols,
            rows = self.rows,
            "star field populated"
        );
    }

    /// A resting star on a random grid cell with a random drift.
    fn spawn_star(&mut self) -> Star {
        Star::new(self.random_position(), self.random_drift())
    }

    fn random_position(&mut self) -> Point {
        let col = self.rng.next_in(0..=u32::from(self.cols) - 1);
        let row = self.rng.next_in(0..=u32::from(self.rows) - 1);
        Point::new(
            (col * u32::from(self.settings.star_size.width)) as i32,
            (row * u32::from(self.settings.star_size.height)) as i32,
        )
    }

    fn random_drift(&mut self) -> Point {
        let last = DRIFT_DIRECTIONS.len() as u32 - 1;
        DRIFT_DIRECTIONS[self.rng.next_in(0..=last) as usize]
    }

    /// Advance every star by one tick.
    ///
    /// Drift is applied only on ticks divisible by `ticks_before_move`.
    /// Nova stages advance on every tick. A resting star may start a nova,
    /// in which case it shows stage 1 until the next tick.
    pub fn update(&mut self, tick: u64) {
        let drift_due = tick % u64::from(self.settings.ticks_before_move.max(1)) == 0;

        for index in 0..self.stars.len() {
            let mut star = self.stars[index];
            if drift_due {
                star.drift_within(self.bounds);
            }
            if star.is_nova() {
                if star.advance_nova() {
                    star = self.spawn_star();
                    trace!(index, tick, "nova burnt out, star respawned");
                }
            } else if self.scheduler.maybe_trigger(&star, &mut self.rng) {
                star.ignite();
                trace!(index, tick, "nova started");
            }
            self.stars[index] = star;
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Stars currently somewhere in their nova sequence, with their index.
    pub fn novas(&self) -> impl Iterator<Item = (usize, &Star)> {
        self.stars.iter().enumerate().filter(|(_, star)| star.is_nova())
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Placement grid as `(cols, rows)`.
    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Widget drawing the field with `sprites`.
    pub fn widget<'a>(&'a self, sprites: &'a SpriteSheet) -> StarFieldWidget<'a, R> {
        StarFieldWidget {
            field: self,
            sprites,
        }
    }
}

/// Draws each star's sprite for its nova stage at the center of its cell.
#[derive(Debug)]
pub struct StarFieldWidget<'a, R> {
    field: &'a StarField<R>,
    sprites: &'a SpriteSheet,
}

impl<R> Widget for StarFieldWidget<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cell = self.field.settings.star_size;
        let center = Point::new(i32::from(cell.width / 2), i32::from(cell.height / 2));
        let bounds = self.field.bounds;

        for star in &self.field.stars {
            let sprite = self.sprites.frame(star.nova_stage);
            let at = star.position.wrapping_offset(center, bounds);
            let (Ok(dx), Ok(dy)) = (u16::try_from(at.x), u16::try_from(at.y)) else {
                continue;
            };
            if dx >= area.width || dy >= area.height {
                continue;
            }
            if let Some(target) = buf.cell_mut((area.x + dx, area.y + dy)) {
                target.set_char(sprite.glyph).set_fg(sprite.color);
            }
        }
    }
}
