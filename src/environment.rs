//! The drawing state threaded through the node tree, and the resolution of fonts and symbols.
//!
//! An [`Environment`] is a small value: nodes that change the style of their children (a superscript
//! shrinking the font, `\bf` switching to bold ...) pass a modified copy down and leave their own untouched.
//! Which concrete family a [`FontRole`] stands for is decided by [`FontSettings`].

use std::fmt::Write;

use crate::css::Rgba;
use crate::font::{resolve_font_family, Encoding, FontDatabase, FontDescriptor, FontMetrics, FontRequest};
use crate::symbols::{SymbolFlags, SymbolFullProps, SymbolProps};

/// Abstract font, mapped to a family by [`FontSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontRole {
    /// text font with serifs
    Roman,
    /// text font without serifs
    Sans,
    /// serif font used in math mode
    MathRoman,
    /// sans-serif font used in math mode
    MathSans,
    /// monospaced font (`\texttt`)
    Typewriter,
    /// script font (`\mathscr`)
    Script,
    /// blackboard bold (`\mathbb`)
    Blackboard,
    /// calligraphic font (`\mathcal`)
    Caligraphic,
    /// fraktur font (`\mathfrak`)
    Fraktur,
    /// font searched for symbols missing from the current font
    FallbackSymbols,
    /// a family given by name (`\userfont{..}`)
    Custom(String),
}

/// Case transformation of text (`\uppercase`, `\lowercase`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterCase {
    /// text is drawn as written
    AsIs,
    /// every letter is drawn in upper case
    Upper,
    /// every letter is drawn in lower case
    Lower,
}

impl Default for LetterCase {
    fn default() -> Self {
        LetterCase::AsIs
    }
}

/// Families for each [`FontRole`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// [`FontRole::Roman`]
    pub roman:            FontDescriptor,
    /// [`FontRole::Sans`]
    pub sans:             FontDescriptor,
    /// [`FontRole::MathRoman`]
    pub math_roman:       FontDescriptor,
    /// [`FontRole::MathSans`]
    pub math_sans:        FontDescriptor,
    /// [`FontRole::Typewriter`]
    pub typewriter:       FontDescriptor,
    /// [`FontRole::Script`]
    pub script:           FontDescriptor,
    /// [`FontRole::Blackboard`]
    pub blackboard:       FontDescriptor,
    /// [`FontRole::Caligraphic`]
    pub caligraphic:      FontDescriptor,
    /// [`FontRole::Fraktur`]
    pub fraktur:          FontDescriptor,
    /// [`FontRole::FallbackSymbols`]
    pub fallback_symbols: FontDescriptor,
    /// draw `\mathbb` letters with the double-struck characters of Unicode instead of relying on a blackboard font
    pub blackboard_simulated: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        let unicode = |family: &str| FontDescriptor::new(family, Encoding::Unicode);
        Self {
            roman:            unicode("serif"),
            sans:             unicode("sans-serif"),
            math_roman:       unicode("serif"),
            math_sans:        unicode("sans-serif"),
            typewriter:       unicode("monospace"),
            script:           unicode("cursive"),
            blackboard:       unicode("serif"),
            caligraphic:      unicode("cursive"),
            fraktur:          unicode("fantasy"),
            fallback_symbols: unicode("XITS Math"),
            blackboard_simulated: true,
        }
    }
}

impl FontSettings {
    /// Descriptor of the family standing for `role`
    pub fn descriptor(&self, role: &FontRole) -> FontDescriptor {
        match *role {
            FontRole::Roman           => self.roman.clone(),
            FontRole::Sans            => self.sans.clone(),
            FontRole::MathRoman       => self.math_roman.clone(),
            FontRole::MathSans        => self.math_sans.clone(),
            FontRole::Typewriter      => self.typewriter.clone(),
            FontRole::Script          => self.script.clone(),
            FontRole::Blackboard      => self.blackboard.clone(),
            FontRole::Caligraphic     => self.caligraphic.clone(),
            FontRole::Fraktur         => self.fraktur.clone(),
            FontRole::FallbackSymbols => self.fallback_symbols.clone(),
            FontRole::Custom(ref family) => FontDescriptor::new(family.clone(), Encoding::Unicode),
        }
    }

    /// Replaces generic keywords (`serif`, `monospace` ...) by the families they stand for in `db`.
    pub fn resolve_keywords(&mut self, db: &dyn FontDatabase) {
        for descriptor in [
            &mut self.roman, &mut self.sans, &mut self.math_roman, &mut self.math_sans, &mut self.typewriter,
            &mut self.script, &mut self.blackboard, &mut self.caligraphic, &mut self.fraktur, &mut self.fallback_symbols,
        ] {
            let family = resolve_font_family(&descriptor.family, db);
            if family != descriptor.family {
                debug!("font keyword '{}' resolved to '{}'", descriptor.family, family);
                descriptor.family = family;
            }
        }
    }
}

/// The drawing state of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// current font
    pub font:        FontRole,
    /// font size in points
    pub font_size:   f64,
    /// text color
    pub color:       Rgba,
    /// bold face
    pub bold:        bool,
    /// italic face
    pub italic:      bool,
    /// draw a line below the text
    pub underlined:  bool,
    /// draw a line above the text
    pub overline:    bool,
    /// draw a line through the text
    pub strike:      bool,
    /// use small capitals for lower-case letters
    pub small_caps:  bool,
    /// case transformation of letters
    #[serde(default)]
    pub letter_case: LetterCase,
    /// inside `$ .. $`
    pub inside_math: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            font:        FontRole::Roman,
            font_size:   10.0,
            color:       Rgba::BLACK,
            bold:        false,
            italic:      false,
            underlined:  false,
            overline:    false,
            strike:      false,
            small_caps:  false,
            letter_case: LetterCase::AsIs,
            inside_math: false,
        }
    }
}

impl Environment {
    /// The role actually used: inside math, the text fonts are replaced by the math fonts.
    pub fn effective_role(&self) -> FontRole {
        match self.font {
            FontRole::Roman if self.inside_math => FontRole::MathRoman,
            FontRole::Sans if self.inside_math  => FontRole::MathSans,
            ref role                            => role.clone(),
        }
    }

    /// Concrete font for text drawn in this environment
    pub fn font_request(&self, settings: &FontSettings) -> FontRequest {
        let descriptor = settings.descriptor(&self.effective_role());
        FontRequest {
            family:   descriptor.family,
            size:     self.font_size,
            bold:     self.bold,
            italic:   self.italic,
            encoding: descriptor.encoding,
        }
    }

    /// Switches to math mode; letters are italic there.
    pub fn enter_math(&mut self) {
        self.inside_math = true;
        self.italic = true;
    }

    /// Copy with the font size multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self { font_size: self.font_size * factor, ..self.clone() }
    }

    /// Copy using `role` as font
    pub fn exchanged_font_for(&self, role: FontRole) -> Self {
        Self { font: role, ..self.clone() }
    }

    /// Copy using the roman font of the current mode
    pub fn exchanged_font_for_roman(&self) -> Self {
        self.exchanged_font_for(if self.inside_math { FontRole::MathRoman } else { FontRole::Roman })
    }

    /// Opening `<span>` carrying the differences between `self` and `default`.
    pub fn to_html_start(&self, default: &Environment, settings: &FontSettings) -> String {
        let mut style = String::new();
        let _ = write!(style, "font-size: {}pt; ", self.font_size);
        if self.italic && !default.italic {
            style.push_str("font-style: italic; ");
        } else if !self.italic && default.italic {
            style.push_str("font-style: normal; ");
        }
        if self.bold && !default.bold {
            style.push_str("font-weight: bold; ");
        }
        if self.color != default.color {
            let _ = write!(style, "color: {}; ", crate::css::color_to_string(self.color));
        }
        if self.font != default.font {
            let _ = write!(style, "font-family: {}; ", self.font_request(settings).family);
        }
        if self.letter_case != default.letter_case {
            match self.letter_case {
                LetterCase::Upper => style.push_str("text-transform: uppercase; "),
                LetterCase::Lower => style.push_str("text-transform: lowercase; "),
                LetterCase::AsIs  => style.push_str("text-transform: none; "),
            }
        }
        let decorations: Vec<&str> = [
            (self.underlined && !default.underlined, "underline"),
            (self.overline && !default.overline, "overline"),
            (self.strike && !default.strike, "line-through"),
        ].iter().filter(|(on, _)| *on).map(|&(_, name)| name).collect();
        if !decorations.is_empty() {
            let _ = write!(style, "text-decoration: {}; ", decorations.join(" "));
        }
        format!("<span style=\"{}\">", style.trim_end())
    }

    /// Closing tag matching [`Environment::to_html_start`]
    pub fn to_html_after(&self) -> &'static str {
        "</span>"
    }
}

/// Which step of the symbol search produced a [`ResolvedSymbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionTier {
    /// the symbol's own font family
    CustomFont,
    /// the current font, in its own encoding
    CurrentFont,
    /// the current font, with the symbol's ASCII / Latin-1 substitute
    Standard,
    /// the fallback symbol font
    FallbackFont,
    /// nothing had the glyph; the last candidate is kept
    Degraded,
}

/// Result of [`resolve_symbol`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSymbol {
    /// what to draw
    pub props:     SymbolProps,
    /// the font to draw it with (size and style already adjusted by the symbol flags)
    pub font:      FontRequest,
    /// the environment after resolution; its font is [`FontRole::FallbackSymbols`] if that font was chosen
    pub env:       Environment,
    /// which step succeeded
    pub tier:      ResolutionTier,
    /// whether the font was found to contain the glyphs
    pub available: bool,
}

/// Font for `props` in the family `descriptor`
fn symbol_font(descriptor: &FontDescriptor, encoding: Encoding, props: &SymbolProps, env: &Environment) -> FontRequest {
    let flags = props.flags;
    let bold = if flags.contains(SymbolFlags::BOLD_ON) { true }
               else if flags.contains(SymbolFlags::BOLD_OFF) { false }
               else { env.bold };
    let italic = if flags.contains(SymbolFlags::ITALIC_ON) { true }
                 else if flags.contains(SymbolFlags::ITALIC_OFF) { false }
                 else { env.italic };
    FontRequest {
        family: descriptor.family.clone(),
        size: env.font_size * props.font_scaling,
        bold,
        italic,
        encoding,
    }
}

fn has_glyphs(metrics: &dyn FontMetrics, font: &FontRequest, text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_whitespace() || metrics.has_glyph(font, c))
}

/// Finds the font and glyph string for the symbol described by `full`, trying in order:
///
///  1. the symbol's own font family, with its Unicode string;
///  2. the current font in its encoding; if the glyph is missing there and the symbol has an ASCII / Latin-1 substitute,
///     that substitute (a substitute of several characters is accepted without checking its glyphs);
///  3. the fallback symbol font, if it has the glyph; the returned environment then uses [`FontRole::FallbackSymbols`];
///  4. whatever the previous steps computed last.
pub fn resolve_symbol(full: &SymbolFullProps, env: &Environment, settings: &FontSettings, metrics: &dyn FontMetrics) -> ResolvedSymbol {
    if let (Some(family), Some(unicode)) = (full.custom_font_family.as_ref(), full.unicode.as_ref()) {
        let descriptor = FontDescriptor::new(family.clone(), Encoding::Unicode);
        let font = symbol_font(&descriptor, Encoding::Unicode, unicode, env);
        let available = has_glyphs(metrics, &font, &unicode.symbol);
        return ResolvedSymbol {
            props: unicode.clone(),
            font,
            env: env.exchanged_font_for(FontRole::Custom(family.clone())),
            tier: ResolutionTier::CustomFont,
            available,
        };
    }

    let descriptor = settings.descriptor(&env.effective_role());
    let mut props = full.props(descriptor.encoding).cloned();
    let mut encoding = descriptor.encoding;
    let mut tier = ResolutionTier::CurrentFont;
    let mut available = props.as_ref()
        .map_or(false, |p| has_glyphs(metrics, &symbol_font(&descriptor, encoding, p, env), &p.symbol));

    if !available && encoding != Encoding::Standard {
        if let Some(standard) = full.standard.as_ref() {
            let font = symbol_font(&descriptor, Encoding::Standard, standard, env);
            // several characters cannot be checked as a single glyph
            available = standard.symbol.chars().count() > 1 || has_glyphs(metrics, &font, &standard.symbol);
            props = Some(standard.clone());
            encoding = Encoding::Standard;
            tier = ResolutionTier::Standard;
        }
    }

    if !available {
        let fallback = &settings.fallback_symbols;
        if let Some(candidate) = full.props(fallback.encoding) {
            let font = symbol_font(fallback, fallback.encoding, candidate, env);
            if has_glyphs(metrics, &font, &candidate.symbol) {
                trace!("symbol {:?} taken from the fallback font '{}'", candidate.symbol, fallback.family);
                return ResolvedSymbol {
                    props: candidate.clone(),
                    font,
                    env: env.exchanged_font_for(FontRole::FallbackSymbols),
                    tier: ResolutionTier::FallbackFont,
                    available: true,
                };
            }
        }
        warn!("no font has a glyph for symbol {:?} (html: {})", props.as_ref().map(|p| p.symbol.as_str()), full.html);
        tier = ResolutionTier::Degraded;
    }

    let props = props.unwrap_or_default();
    let font = symbol_font(&descriptor, encoding, &props, env);
    ResolvedSymbol { props, font, env: env.clone(), tier, available }
}
