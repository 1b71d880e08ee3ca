/// Implementations of the [`FontMetrics`] trait on top of font parsing crates, like 'ttf-parser'.
#[deny(missing_docs)]
pub mod backend;
/// Deterministic metrics which do not need any font file.
#[deny(missing_docs)]
pub mod fixed;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{FontError, FontResult};

pub use self::fixed::FixedMetrics;


/// Which of the glyph strings of a symbol a font can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// The font covers (a large part of) Unicode, including the math blocks
    Unicode,
    /// The font only has ASCII / Latin-1 glyphs; symbols are replaced by ASCII substitutes
    Standard,
    /// The font uses the codepoints of the Windows "Symbol" font (Greek letters at `a`..`z` ...)
    WinSymbol,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Unicode
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Encoding::Unicode   => "unicode",
            Encoding::Standard  => "standard",
            Encoding::WinSymbol => "winsymbol",
        };
        f.write_str(s)
    }
}

/// A font family, possibly given as a [`StyleKeyword`], and the encoding its glyphs follow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// family name, e.g. `"DejaVu Serif"` or a keyword such as `"sans-serif"`
    pub family:   String,
    /// encoding of the font
    #[serde(default)]
    pub encoding: Encoding,
}

impl FontDescriptor {
    /// Creates a descriptor
    pub fn new(family: impl Into<String>, encoding: Encoding) -> Self {
        Self { family: family.into(), encoding }
    }
}

/// A concrete font, as handed to [`FontMetrics`] and to [`Canvas::draw_text`](crate::render::Canvas::draw_text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRequest {
    /// family name
    pub family:   String,
    /// size in points
    pub size:     f64,
    /// bold face
    pub bold:     bool,
    /// italic face
    pub italic:   bool,
    /// encoding of the glyph strings drawn with this font
    pub encoding: Encoding,
}

impl FontRequest {
    /// A regular (neither bold nor italic) font
    pub fn new(family: impl Into<String>, size: f64, encoding: Encoding) -> Self {
        Self { family: family.into(), size, bold: false, italic: false, encoding }
    }

    /// Same font, with a different size
    pub fn with_size(&self, size: f64) -> Self {
        Self { size, ..self.clone() }
    }

    /// Same font, upright
    pub fn non_italic(&self) -> Self {
        Self { italic: false, ..self.clone() }
    }
}

/// A rectangle. The y axis points downwards and the baseline of a text lies at `y = 0`,
/// so the box of a glyph that sits on the baseline has a negative `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// left edge
    pub x:      f64,
    /// top edge
    pub y:      f64,
    /// width
    pub width:  f64,
    /// height
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// y coordinate of the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// x coordinate of the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Extent above the baseline
    pub fn ascent(&self) -> f64 {
        self.height - self.bottom()
    }
}

/// Font measurements needed by the layout.
/// All lengths are in the unit of the drawing surface and follow the conventions of [`Rect`].
pub trait FontMetrics {
    /// Box of `text` as it is advanced: its width is the advance width of the string.
    fn bounding_rect(&self, font: &FontRequest, text: &str) -> Rect;
    /// Smallest box enclosing the ink of `text`.
    fn tight_bounding_rect(&self, font: &FontRequest, text: &str) -> Rect;
    /// Width of lines drawn next to this font (fraction bars, underlines ...)
    fn line_width(&self, font: &FontRequest) -> f64;
    /// Distance from the baseline to the top of the font's tallest glyphs
    fn ascent(&self, font: &FontRequest) -> f64;
    /// Distance from the baseline to the bottom of the font's lowest glyphs (positive)
    fn descent(&self, font: &FontRequest) -> f64;
    /// Height of lower-case letters without ascenders
    fn x_height(&self, font: &FontRequest) -> f64;
    /// Distance from the baseline up to the strike-out line
    fn strikeout_pos(&self, font: &FontRequest) -> f64;
    /// Distance from the right end of the ink of `c` to its advance
    fn right_bearing(&self, font: &FontRequest, c: char) -> f64;
    /// Whether the font has a glyph for `c`
    fn has_glyph(&self, font: &FontRequest, c: char) -> bool;
}

/// Generic font families which [`resolve_font_family`] replaces by concrete family names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleKeyword {
    /// `serif`
    Serif,
    /// `sans-serif`, `sans`
    SansSerif,
    /// `monospace`
    Monospace,
    /// `typewriter`
    Typewriter,
    /// `cursive`, `script`
    Cursive,
    /// `fantasy`
    Fantasy,
    /// `decorative`
    Decorative,
    /// `system`
    System,
    /// `fixed`
    Fixed,
    /// `smallest-readable`
    SmallestReadable,
    /// `title`
    Title,
    /// `general`
    General,
    /// `default`, `app`
    Default,
}

impl StyleKeyword {
    /// Reads a keyword; case and surrounding whitespace are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let keyword = match name.trim().to_lowercase().as_str() {
            "serif"                                                  => StyleKeyword::Serif,
            "sans-serif" | "sansserif" | "sans" | "sans serif"       => StyleKeyword::SansSerif,
            "monospace"                                              => StyleKeyword::Monospace,
            "typewriter"                                             => StyleKeyword::Typewriter,
            "cursive" | "script"                                     => StyleKeyword::Cursive,
            "fantasy"                                                => StyleKeyword::Fantasy,
            "decorative"                                             => StyleKeyword::Decorative,
            "system"                                                 => StyleKeyword::System,
            "fixed"                                                  => StyleKeyword::Fixed,
            "smallest-readable" | "smallest_readable"
                | "smallestreadable" | "smallest readable" | "smallest" => StyleKeyword::SmallestReadable,
            "title"                                                  => StyleKeyword::Title,
            "general"                                                => StyleKeyword::General,
            "default" | "app" | "application"                        => StyleKeyword::Default,
            _                                                        => return None,
        };
        Some(keyword)
    }
}

/// The fonts available on the system (or bundled with the application).
pub trait FontDatabase {
    /// Family names of all available fonts
    fn families(&self) -> Vec<String>;
    /// Concrete family name standing for a generic keyword
    fn resolve_keyword(&self, keyword: StyleKeyword) -> String;
    /// Reads a font file, typically one bundled with the application
    fn load_font_file(&self, path: &Path) -> FontResult<Vec<u8>>;
}

/// Replaces a [`StyleKeyword`] by the family it stands for in `db`. Other names are returned unchanged.
pub fn resolve_font_family(name: &str, db: &dyn FontDatabase) -> String {
    match StyleKeyword::from_name(name) {
        Some(keyword) => db.resolve_keyword(keyword),
        None => name.to_string(),
    }
}

/// Guesses the encoding of a font family from its name and the glyphs it contains.
pub fn estimate_encoding(family: &str, metrics: &dyn FontMetrics) -> Encoding {
    let lower = family.trim().to_lowercase();
    if lower == "symbol" {
        return Encoding::WinSymbol;
    }
    if ["xits", "stix", "asana"].iter().any(|p| lower.starts_with(p)) {
        return Encoding::Unicode;
    }
    let font = FontRequest::new(family, 10.0, Encoding::Unicode);
    // alpha, right arrow, partial, element of
    if ['\u{3B1}', '\u{2192}', '\u{2202}', '\u{2208}'].iter().any(|&c| metrics.has_glyph(&font, c)) {
        return Encoding::Unicode;
    }
    Encoding::Standard
}

/// A [`FontDatabase`] given by a fixed list of families and a keyword table.
/// Font files are looked up relative to `font_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFontDatabase {
    /// family names
    pub families: Vec<String>,
    /// family standing for each keyword
    pub keywords: BTreeMap<StyleKeyword, String>,
    /// directory of bundled font files
    pub font_dir: PathBuf,
}

impl Default for StaticFontDatabase {
    fn default() -> Self {
        use self::StyleKeyword::*;
        let keywords: BTreeMap<StyleKeyword, String> = [
            (Serif,            "DejaVu Serif"),
            (SansSerif,        "DejaVu Sans"),
            (Monospace,        "DejaVu Sans Mono"),
            (Typewriter,       "DejaVu Sans Mono"),
            (Cursive,          "URW Chancery L"),
            (Fantasy,          "Comic Sans MS"),
            (Decorative,       "Comic Sans MS"),
            (System,           "DejaVu Sans"),
            (Fixed,            "DejaVu Sans Mono"),
            (SmallestReadable, "DejaVu Sans"),
            (Title,            "DejaVu Sans"),
            (General,          "DejaVu Sans"),
            (Default,          "DejaVu Sans"),
        ].iter().map(|&(k, v)| (k, v.to_string())).collect();

        let mut families: Vec<String> = keywords.values().cloned().collect();
        families.sort();
        families.dedup();

        Self { families, keywords, font_dir: PathBuf::from(".") }
    }
}

impl FontDatabase for StaticFontDatabase {
    fn families(&self) -> Vec<String> {
        self.families.clone()
    }

    fn resolve_keyword(&self, keyword: StyleKeyword) -> String {
        match self.keywords.get(&keyword) {
            Some(family) => family.clone(),
            None => {
                warn!("no family registered for font keyword {:?}", keyword);
                self.families.first().cloned().unwrap_or_default()
            },
        }
    }

    fn load_font_file(&self, path: &Path) -> FontResult<Vec<u8>> {
        let full = self.font_dir.join(path);
        debug!("loading font file {}", full.display());
        let bytes = std::fs::read(&full)?;
        if bytes.len() < 4 {
            return Err(FontError::Unparsable(format!("{}: file too short", full.display())));
        }
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        let db = StaticFontDatabase::default();
        let tests = [
            ("serif",              "DejaVu Serif"),
            ("Sans-Serif",         "DejaVu Sans"),
            (" monospace ",        "DejaVu Sans Mono"),
            ("smallest-readable",  "DejaVu Sans"),
            ("app",                "DejaVu Sans"),
            ("Fira Sans",          "Fira Sans"),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(resolve_font_family(input, &db), expected);
        }
    }

    #[test]
    fn encodings() {
        let metrics = FixedMetrics::new()
            .without_glyphs("Plain", &['\u{3B1}', '\u{2192}', '\u{2202}', '\u{2208}']);
        assert_eq!(estimate_encoding("Symbol", &metrics), Encoding::WinSymbol);
        assert_eq!(estimate_encoding("XITS Math", &metrics), Encoding::Unicode);
        assert_eq!(estimate_encoding("Anything", &metrics), Encoding::Unicode);
        assert_eq!(estimate_encoding("Plain", &metrics), Encoding::Standard);
    }

    #[test]
    fn missing_font_file() {
        let db = StaticFontDatabase { font_dir: PathBuf::from("/nonexistent-dir"), ..Default::default() };
        assert!(matches!(db.load_font_file(Path::new("xits-math.otf")), Err(FontError::Io(_))));
    }
}
