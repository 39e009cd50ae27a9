//! Font description for the clock overlay.

use serde::{Deserialize, Serialize};

/// Glyph families the overlay knows how to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFamily {
    /// Ordinary terminal text on a single line.
    Plain,
    /// Large block letters, five rows tall.
    #[default]
    Block,
}

impl FontFamily {
    /// Parse a family name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Some(FontFamily::Plain),
            "block" | "big" => Some(FontFamily::Block),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Plain => "plain",
            FontFamily::Block => "block",
        }
    }
}

/// Family and size of the clock font as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    /// Horizontal scale factor for block glyphs.
    pub size: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: FontFamily::Block.name().to_string(),
            size: 1,
        }
    }
}

impl FontSpec {
    /// Resolved family, `None` when the configured name is unknown.
    pub fn family(&self) -> Option<FontFamily> {
        FontFamily::from_name(&self.family)
    }
}
