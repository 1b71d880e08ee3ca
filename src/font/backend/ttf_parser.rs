use ttf_parser::{Face, GlyphId};

use crate::error::{FontError, FontResult};
use crate::font::{FontMetrics, FontRequest, Rect};


/// A face together with the family and style it is registered under.
struct Entry<'a> {
    family: String,
    bold:   bool,
    italic: bool,
    face:   Face<'a>,
}

/// Font metrics read from one or more `ttf_parser::Face`s.
///
/// Faces are registered under a family name; a [`FontRequest`] is served by the face matching its family and style
/// best, or by the first registered face if no family matches.
#[derive(Default)]
pub struct TtfFontMetrics<'a> {
    faces: Vec<Entry<'a>>,
}

impl<'a> TtfFontMetrics<'a> {
    /// Metrics without any face. Add faces with [`TtfFontMetrics::add_face`] or [`TtfFontMetrics::load`].
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    /// Registers a parsed face under `family`.
    pub fn add_face(&mut self, family: &str, bold: bool, italic: bool, face: Face<'a>) {
        debug!("registering face for family '{}' (bold: {}, italic: {})", family, bold, italic);
        self.faces.push(Entry { family: family.to_string(), bold, italic, face });
    }

    /// Parses the first face of `data` and registers it under `family`.
    pub fn load(&mut self, family: &str, data: &'a [u8]) -> FontResult<()> {
        let face = Face::parse(data, 0).map_err(|e| FontError::Unparsable(e.to_string()))?;
        self.add_face(family, face.is_bold(), face.is_italic(), face);
        Ok(())
    }

    /// The face serving `font`, along with the scale from font units to the drawing unit.
    pub fn face_for(&self, font: &FontRequest) -> Option<(&Face<'a>, f64)> {
        let same_family = |e: &&Entry<'a>| e.family == font.family;
        let entry = self.faces.iter()
            .filter(same_family)
            .find(|e| e.bold == font.bold && e.italic == font.italic)
            .or_else(|| self.faces.iter().find(same_family))
            .or_else(|| self.faces.first())?;
        let scale = font.size / f64::from(entry.face.units_per_em());
        Some((&entry.face, scale))
    }

    fn glyph(face: &Face<'a>, c: char) -> Option<GlyphId> {
        face.glyph_index(c)
    }
}

impl<'a> FontMetrics for TtfFontMetrics<'a> {
    fn bounding_rect(&self, font: &FontRequest, text: &str) -> Rect {
        let (face, scale) = match self.face_for(font) {
            Some(face) => face,
            None => return Rect::default(),
        };
        let advance: f64 = text.chars()
            .filter_map(|c| Self::glyph(face, c))
            .filter_map(|gid| face.glyph_hor_advance(gid))
            .map(f64::from)
            .sum();
        let ascent = f64::from(face.ascender()) * scale;
        let descent = -f64::from(face.descender()) * scale;
        Rect::new(0.0, -ascent, advance * scale, ascent + descent)
    }

    fn tight_bounding_rect(&self, font: &FontRequest, text: &str) -> Rect {
        let (face, scale) = match self.face_for(font) {
            Some(face) => face,
            None => return Rect::default(),
        };
        let mut pen = 0.0;
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for gid in text.chars().filter_map(|c| Self::glyph(face, c)) {
            if let Some(bbox) = face.glyph_bounding_box(gid) {
                // font units have y pointing up
                let x0 = pen + f64::from(bbox.x_min);
                let x1 = pen + f64::from(bbox.x_max);
                let y0 = -f64::from(bbox.y_max);
                let y1 = -f64::from(bbox.y_min);
                bounds = Some(match bounds {
                    Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
                    None => (x0, y0, x1, y1),
                });
            }
            pen += face.glyph_hor_advance(gid).map(f64::from).unwrap_or_default();
        }
        match bounds {
            Some((x0, y0, x1, y1)) => Rect::new(x0 * scale, y0 * scale, (x1 - x0) * scale, (y1 - y0) * scale),
            None => Rect::default(),
        }
    }

    fn line_width(&self, font: &FontRequest) -> f64 {
        self.face_for(font)
            .and_then(|(face, scale)| face.underline_metrics().map(|m| f64::from(m.thickness) * scale))
            .filter(|w| *w > 0.0)
            .unwrap_or(font.size / 20.0)
    }

    fn ascent(&self, font: &FontRequest) -> f64 {
        self.face_for(font)
            .map(|(face, scale)| f64::from(face.ascender()) * scale)
            .unwrap_or_default()
    }

    fn descent(&self, font: &FontRequest) -> f64 {
        self.face_for(font)
            .map(|(face, scale)| -f64::from(face.descender()) * scale)
            .unwrap_or_default()
    }

    fn x_height(&self, font: &FontRequest) -> f64 {
        self.face_for(font)
            .and_then(|(face, scale)| face.x_height().map(|h| f64::from(h) * scale))
            .unwrap_or_else(|| self.tight_bounding_rect(font, "x").ascent())
    }

    fn strikeout_pos(&self, font: &FontRequest) -> f64 {
        self.face_for(font)
            .and_then(|(face, scale)| face.strikeout_metrics().map(|m| f64::from(m.position) * scale))
            .unwrap_or_else(|| self.x_height(font) / 2.0)
    }

    fn right_bearing(&self, font: &FontRequest, c: char) -> f64 {
        let bearing = |(face, scale): (&Face<'a>, f64)| {
            let gid = Self::glyph(face, c)?;
            let advance = f64::from(face.glyph_hor_advance(gid)?);
            let bbox = face.glyph_bounding_box(gid)?;
            Some((advance - f64::from(bbox.x_max)) * scale)
        };
        self.face_for(font).and_then(bearing).unwrap_or_default()
    }

    fn has_glyph(&self, font: &FontRequest, c: char) -> bool {
        self.face_for(font)
            .map_or(false, |(face, _)| Self::glyph(face, c).is_some())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Encoding;

    #[test]
    fn no_face() {
        let metrics = TtfFontMetrics::new();
        let font = FontRequest::new("Serif", 10.0, Encoding::Unicode);
        assert_eq!(metrics.tight_bounding_rect(&font, "x"), Rect::default());
        assert!(!metrics.has_glyph(&font, 'x'));
        assert_eq!(metrics.line_width(&font), 0.5);
    }

    #[test]
    fn unparsable_face() {
        let mut metrics = TtfFontMetrics::new();
        let garbage = [0u8; 16];
        assert!(matches!(metrics.load("Garbage", &garbage), Err(FontError::Unparsable(_))));
    }
}
