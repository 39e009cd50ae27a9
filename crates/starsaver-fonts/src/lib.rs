//! Glyph tables for the starsaver clock overlay.
//!
//! Text is drawn either as-is on a single line or as block letters five
//! rows tall. Block letters cover what clock formats usually produce:
//! digits, separators and the AM/PM markers.

use starsaver_core::FontFamily;

/// Height of a block glyph in rows.
pub const BLOCK_HEIGHT: usize = 5;

type Glyph = [&'static str; BLOCK_HEIGHT];

const DIGITS: [Glyph; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", " ██", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

const COLON: Glyph = [" ", "█", " ", "█", " "];
const DOT: Glyph = [" ", " ", " ", " ", "█"];
const DASH: Glyph = ["   ", "   ", "███", "   ", "   "];
const SLASH: Glyph = ["  █", "  █", " █ ", "█  ", "█  "];
const SPACE: Glyph = ["  ", "  ", "  ", "  ", "  "];
const LETTER_A: Glyph = [" █ ", "█ █", "███", "█ █", "█ █"];
const LETTER_P: Glyph = ["██ ", "█ █", "██ ", "█  ", "█  "];
const LETTER_M: Glyph = ["█   █", "██ ██", "█ █ █", "█   █", "█   █"];
const UNKNOWN: Glyph = ["   ", "   ", "   ", "   ", "   "];

/// Block glyph for `c`, if there is one.
pub fn block_glyph(c: char) -> Option<&'static Glyph> {
    let glyph = match c.to_ascii_uppercase() {
        '0'..='9' => &DIGITS[(c as u8 - b'0') as usize],
        ':' => &COLON,
        '.' => &DOT,
        '-' => &DASH,
        '/' => &SLASH,
        ' ' => &SPACE,
        'A' => &LETTER_A,
        'P' => &LETTER_P,
        'M' => &LETTER_M,
        _ => return None,
    };
    Some(glyph)
}

/// Lay out `text` in the given family.
///
/// `scale` stretches block glyphs horizontally and is ignored for plain
/// text. Characters without a block glyph leave a blank gap.
pub fn render_text(family: FontFamily, scale: u16, text: &str) -> Vec<String> {
    match family {
        FontFamily::Plain => vec![text.to_string()],
        FontFamily::Block => render_block(text, scale.max(1) as usize),
    }
}

fn render_block(text: &str, scale: usize) -> Vec<String> {
    let mut lines = vec![String::new(); BLOCK_HEIGHT];
    for (i, c) in text.chars().enumerate() {
        let glyph = block_glyph(c).unwrap_or(&UNKNOWN);
        for (line, row) in lines.iter_mut().zip(glyph.iter()) {
            if i > 0 {
                line.push(' ');
            }
            for ch in row.chars() {
                line.extend(std::iter::repeat_n(ch, scale));
            }
        }
    }
    lines
}

/// Whether every character of `text` has a block glyph.
pub fn has_block_glyphs(text: &str) -> bool {
    text.chars().all(|c| block_glyph(c).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_single_line() {
        assert_eq!(render_text(FontFamily::Plain, 3, "12:30"), vec!["12:30"]);
    }

    #[test]
    fn test_block_rows() {
        let lines = render_text(FontFamily::Block, 1, "1:0");
        assert_eq!(lines.len(), BLOCK_HEIGHT);
        assert_eq!(lines[0], " █    ███");
        assert_eq!(lines[1], "██  █ █ █");
        assert_eq!(lines[4], "███   ███");
    }

    #[test]
    fn test_block_scale_doubles_width() {
        let narrow = render_text(FontFamily::Block, 1, "8");
        let wide = render_text(FontFamily::Block, 2, "8");
        assert_eq!(wide[0].chars().count(), 2 * narrow[0].chars().count());
        assert_eq!(wide[1], "██  ██");
    }

    #[test]
    fn test_lowercase_am_pm() {
        assert_eq!(block_glyph('p'), block_glyph('P'));
        assert!(block_glyph('m').is_some());
    }

    #[test]
    fn test_unknown_char_leaves_gap() {
        assert!(block_glyph('x').is_none());
        let lines = render_text(FontFamily::Block, 1, "x");
        assert_eq!(lines[2], "   ");
    }

    #[test]
    fn test_has_block_glyphs() {
        assert!(has_block_glyphs("12:30 PM"));
        assert!(has_block_glyphs("09/03-2024"));
        assert!(!has_block_glyphs("Sat 09"));
    }
}
