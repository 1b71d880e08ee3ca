//! Deterministic font metrics computed from a few per-character classes, scaled by the font size.
//!
//! They do not look at any font file, which makes them useful for tests and for measuring on a
//! headless machine. Individual glyphs (or all non Latin-1 glyphs) can be removed from a family
//! to exercise the font fallback.

use std::collections::{BTreeMap, BTreeSet};

use super::{FontMetrics, FontRequest, Rect};

/// Fractions of the font size
const ASCENT:       f64 = 0.8;
const DESCENT:      f64 = 0.2;
const X_HEIGHT:     f64 = 0.5;
const CAP_HEIGHT:   f64 = 0.7;
const STRIKEOUT:    f64 = 0.25;
const LINE_WIDTH:   f64 = 0.05;
const INK_INSET:    f64 = 0.02;
const ITALIC_SLANT: f64 = 0.1;
const BOLD_EXTRA:   f64 = 1.1;

/// See the [module](self) documentation.
#[derive(Debug, Clone, Default)]
pub struct FixedMetrics {
    missing:     BTreeMap<String, BTreeSet<char>>,
    latin1_only: BTreeSet<String>,
}

impl FixedMetrics {
    /// Metrics in which every family has every glyph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `chars` from `family`.
    pub fn without_glyphs(mut self, family: &str, chars: &[char]) -> Self {
        self.missing.entry(family.to_string())
            .or_default()
            .extend(chars.iter().copied());
        self
    }

    /// Removes every glyph outside of Latin-1 from `family`.
    pub fn latin1_only(mut self, family: &str) -> Self {
        self.latin1_only.insert(family.to_string());
        self
    }

    fn advance(c: char) -> f64 {
        match c {
            ' '                                           => 0.25,
            'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' |
            '|' | '\'' | '`'                              => 0.25,
            '(' | ')' | '[' | ']' | '{' | '}'             => 0.33,
            'm' | 'w' | 'M' | 'W'                         => 0.85,
            'A' ..= 'Z'                                   => 0.7,
            '0' ..= '9'                                   => 0.5,
            'a' ..= 'z'                                   => 0.5,
            '\u{2200}' ..= '\u{22FF}'                     => 0.75,
            _                                             => 0.6,
        }
    }

    /// Top (negative) and bottom of the ink of `c`, as fractions of the font size
    fn vertical_extent(c: char) -> (f64, f64) {
        match c {
            ' '                                                 => (0.0, 0.0),
            'g' | 'p' | 'q' | 'y'                               => (-X_HEIGHT, DESCENT),
            'j'                                                 => (-CAP_HEIGHT, DESCENT),
            '(' | ')' | '[' | ']' | '{' | '}' | '|'             => (-CAP_HEIGHT - 0.05, DESCENT),
            'b' | 'd' | 'f' | 'h' | 'i' | 'k' | 'l' | 't'       => (-CAP_HEIGHT, 0.0),
            'a' ..= 'z'                                         => (-X_HEIGHT, 0.0),
            'A' ..= 'Z' | '0' ..= '9'                           => (-CAP_HEIGHT, 0.0),
            '-' | '+' | '=' | '<' | '>' | '*' | '~'             => (-0.45, -0.1),
            '.' | ','                                           => (-0.1, 0.05),
            '\u{2211}' | '\u{220F}' | '\u{2210}' |
            '\u{222B}' ..= '\u{2230}' | '\u{22C0}' ..= '\u{22C3}' => (-0.75, 0.25),
            _                                                   => (-CAP_HEIGHT, 0.05),
        }
    }

    fn width(font: &FontRequest, text: &str) -> f64 {
        let w: f64 = text.chars().map(Self::advance).sum();
        let w = if font.bold { w * BOLD_EXTRA } else { w };
        w * font.size
    }
}

impl FontMetrics for FixedMetrics {
    fn bounding_rect(&self, font: &FontRequest, text: &str) -> Rect {
        let ascent = ASCENT * font.size;
        Rect::new(0.0, -ascent, Self::width(font, text), ascent + DESCENT * font.size)
    }

    fn tight_bounding_rect(&self, font: &FontRequest, text: &str) -> Rect {
        let (top, bottom) = text.chars()
            .filter(|c| !c.is_whitespace())
            .map(Self::vertical_extent)
            .fold(None, |acc: Option<(f64, f64)>, (t, b)| match acc {
                Some((t0, b0)) => Some((t0.min(t), b0.max(b))),
                None => Some((t, b)),
            })
            .unwrap_or((0.0, 0.0));

        let inset = INK_INSET * font.size;
        let mut width = (Self::width(font, text) - 2.0 * inset).max(0.0);
        if font.italic && width > 0.0 {
            width += ITALIC_SLANT * font.size;
        }
        let x = if width > 0.0 { inset } else { 0.0 };
        Rect::new(x, top * font.size, width, (bottom - top) * font.size)
    }

    fn line_width(&self, font: &FontRequest) -> f64 {
        let w = LINE_WIDTH * font.size;
        if font.bold { w * BOLD_EXTRA } else { w }
    }

    fn ascent(&self, font: &FontRequest) -> f64 {
        ASCENT * font.size
    }

    fn descent(&self, font: &FontRequest) -> f64 {
        DESCENT * font.size
    }

    fn x_height(&self, font: &FontRequest) -> f64 {
        X_HEIGHT * font.size
    }

    fn strikeout_pos(&self, font: &FontRequest) -> f64 {
        STRIKEOUT * font.size
    }

    fn right_bearing(&self, font: &FontRequest, _c: char) -> f64 {
        if font.italic { -ITALIC_SLANT * font.size } else { INK_INSET * font.size }
    }

    fn has_glyph(&self, font: &FontRequest, c: char) -> bool {
        if self.latin1_only.contains(&font.family) && u32::from(c) > 0xFF {
            return false;
        }
        !self.missing.get(&font.family).map_or(false, |set| set.contains(&c))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Encoding;

    #[test]
    fn scales_with_size() {
        let metrics = FixedMetrics::new();
        let small = FontRequest::new("Serif", 10.0, Encoding::Unicode);
        let large = small.with_size(20.0);
        for text in ["x", "Hello", "(", "\u{2211}"] {
            eprintln!("Input: {:?}", text);
            let a = metrics.tight_bounding_rect(&small, text);
            let b = metrics.tight_bounding_rect(&large, text);
            assert!((2.0 * a.width - b.width).abs() < 1e-9);
            assert!((2.0 * a.height - b.height).abs() < 1e-9);
        }
    }

    #[test]
    fn tight_boxes() {
        let metrics = FixedMetrics::new();
        let font = FontRequest::new("Serif", 10.0, Encoding::Unicode);
        let x = metrics.tight_bounding_rect(&font, "x");
        assert_eq!(x.ascent(), metrics.x_height(&font));
        assert_eq!(x.bottom(), 0.0);
        let g = metrics.tight_bounding_rect(&font, "g");
        assert!(g.bottom() > 0.0);
        assert_eq!(metrics.tight_bounding_rect(&font, ""), Rect::default());
        assert!(metrics.bounding_rect(&font, "ab").width > metrics.tight_bounding_rect(&font, "ab").width);
    }

    #[test]
    fn missing_glyphs() {
        let metrics = FixedMetrics::new()
            .without_glyphs("Serif", &['\u{3B1}'])
            .latin1_only("Plain");
        let serif = FontRequest::new("Serif", 10.0, Encoding::Unicode);
        let plain = FontRequest::new("Plain", 10.0, Encoding::Standard);
        assert!(!metrics.has_glyph(&serif, '\u{3B1}'));
        assert!(metrics.has_glyph(&serif, '\u{3B2}'));
        assert!(metrics.has_glyph(&plain, '\u{B0}'));
        assert!(!metrics.has_glyph(&plain, '\u{2192}'));
    }
}
