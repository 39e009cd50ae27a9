//! Clock text drawn over the star field.

use std::cell::Cell;
use std::fmt::{Display, Write};

use chrono::{
    DateTime, TimeZone,
    format::{Item, StrftimeItems},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};
use starsaver_config::ClockConfig;
use starsaver_core::FontFamily;
use starsaver_fonts::{has_block_glyphs, render_text};
use tracing::warn;

/// Formats the current time and draws it centered on the surface.
///
/// Holds nothing but the settings it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOverlay {
    format: String,
    family: FontFamily,
    scale: u16,
    color: Color,
    /// Set once the block font could not draw some text.
    reported_plain_fallback: Cell<bool>,
}

impl ClockOverlay {
    /// Build the overlay, or `None` when it is disabled.
    ///
    /// An unparsable format disables the overlay instead of failing.
    pub fn from_config(clock: Option<&ClockConfig>) -> Option<Self> {
        let clock = clock?;
        let format = clock.date_format.as_deref()?.trim();
        if format.is_empty() {
            return None;
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            warn!(format, "invalid clock format, clock overlay disabled");
            return None;
        }
        let family = clock.font.family().unwrap_or_else(|| {
            warn!(family = %clock.font.family, "unknown clock font, using block");
            FontFamily::Block
        });
        Some(Self {
            format: format.to_string(),
            family,
            scale: clock.font.size,
            color: clock.color.to_color(),
            reported_plain_fallback: Cell::new(false),
        })
    }

    /// `now` rendered with the configured format.
    pub fn text<Tz>(&self, now: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut text = String::new();
        write!(text, "{}", now.format(&self.format)).ok()?;
        Some(text)
    }

    /// Family able to draw all of `text`: block text with characters
    /// outside the block glyph set is drawn plain instead.
    fn family_for(&self, text: &str) -> FontFamily {
        if self.family != FontFamily::Block || has_block_glyphs(text) {
            return self.family;
        }
        if !self.reported_plain_fallback.replace(true) {
            warn!(text, "clock text has no block glyphs, drawing plain text");
        }
        FontFamily::Plain
    }

    /// Draw the formatted time in the middle of `area`.
    pub fn render<Tz>(&self, area: Rect, buf: &mut Buffer, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(text) = self.text(now) else {
            return;
        };
        let lines = render_text(self.family_for(&text), self.scale, &text);

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(area);

        let style = Style::new().fg(self.color);
        let text: Vec<Line> = lines
            .into_iter()
            .map(|s| Line::from(s).style(style))
            .collect();
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(middle, buf);
    }
}
