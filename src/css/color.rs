//! Parsing colors given as CSS values (`#f0f`, `rgb(100% 0 50% / 10%)`, `hsv(180deg 127 127)`, `salmon`),
//! and converting them back to strings.

use std::fmt;

use super::lexer::{CssTokenizer, TokenType};
use super::named;
use crate::error::{CssError, CssResult};

/// A 8-bit per channel RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// red
    pub r: u8,
    /// green
    pub g: u8,
    /// blue
    pub b: u8,
    /// alpha (255 is opaque)
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Creates a color from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from channels in `[0, 1]`
    pub fn from_rgb_f(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }

    /// Creates a color from hue, saturation and lightness, all in `[0, 1]`
    pub fn from_hsl_f(h: f64, s: f64, l: f64, a: f64) -> Self {
        if s <= 0.0 {
            return Self::from_rgb_f(l, l, l, a);
        }
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let (r, g, b) = hue_to_rgb(h, c);
        let m = l - c / 2.0;
        Self::from_rgb_f(r + m, g + m, b + m, a)
    }

    /// Creates a color from hue, saturation and value, all in `[0, 1]`
    pub fn from_hsv_f(h: f64, s: f64, v: f64, a: f64) -> Self {
        let c = v * s;
        let (r, g, b) = hue_to_rgb(h, c);
        let m = v - c;
        Self::from_rgb_f(r + m, g + m, b + m, a)
    }

    /// Channels as fractions in `[0, 1]`
    pub fn to_f(self) -> (f64, f64, f64, f64) {
        let f = |v: u8| f64::from(v) / 255.0;
        (f(self.r), f(self.g), f(self.b), f(self.a))
    }

    /// Checks whether the color is fully opaque
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&color_to_string(*self))
    }
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Red, green, blue components (before adding the lightness offset) for a hue in turns and a chroma
fn hue_to_rgb(h: f64, c: f64) -> (f64, f64, f64) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    }
}

/// Color functions and the minimum and maximum number of arguments they take
const COLOR_FUNCTIONS: &[(&str, usize, usize)] = &[
    ("rgb",   3, 4),
    ("rgba",  4, 4),
    ("hsl",   3, 4),
    ("hsv",   3, 4),
    ("gray",  1, 2),
    ("grey",  1, 2),
    ("red",   1, 2),
    ("green", 1, 2),
    ("blue",  1, 2),
];

/// Parses a color. See the [module](self) documentation for accepted forms.
pub fn parse_color(input: &str) -> CssResult<Rgba> {
    let mut tokenizer = CssTokenizer::new(input);
    tokenizer.get_token()?;
    let color = parse_color_at(&mut tokenizer)?;
    // `parse_color_at` leaves the last token of the color as current token
    let next = tokenizer.get_token()?;
    if !next.is(TokenType::End) {
        return Err(CssError::UnexpectedTerm { term: next.to_string(), pos: tokenizer.pos() });
    }
    Ok(color)
}

/// Parses a color starting at the tokenizer's current token.
/// On return, the current token is the last token belonging to the color.
pub(crate) fn parse_color_at(tokenizer: &mut CssTokenizer<'_>) -> CssResult<Rgba> {
    let current = tokenizer.current_token().clone();
    match current.kind {
        TokenType::HexString => parse_hex(&current.text),
        TokenType::Name => {
            let func = current.norm_text();
            match COLOR_FUNCTIONS.iter().find(|(name, _, _)| *name == func) {
                Some(&(_, min, max)) => {
                    let next = tokenizer.peek_next_token()?;
                    if !next.is(TokenType::LBracket) {
                        // `red`, `green` ... are also color names
                        return named::lookup(&func).ok_or_else(|| {
                            CssError::UnexpectedToken {
                                expected: TokenType::LBracket.to_string(),
                                found: next.to_string(),
                                pos: tokenizer.pos(),
                                context: Some(func.clone()),
                            }
                        });
                    }
                    tokenizer.get_token()?;
                    parse_color_function(tokenizer, &func, min, max)
                },
                None => named::lookup(&func).ok_or(CssError::UnknownColorName(current.text.clone())),
            }
        },
        _ => Err(tokenizer.unexpected("a color (NAME or HEXSTRING)", None)),
    }
}

fn parse_color_function(tokenizer: &mut CssTokenizer<'_>, func: &str, min: usize, max: usize) -> CssResult<Rgba> {
    let mut params: Vec<f64> = Vec::with_capacity(max);
    let is_hue_function = func == "hsl" || func == "hsv";

    tokenizer.get_token()?;
    while let Some(num) = tokenizer.current_token().as_number_with_unit() {
        let index = params.len();
        // every argument of a fixed-arity function is a fraction
        let is_fraction = (min != max && index == max - 1) || min == 4;
        let value =
            if index == 0 && is_hue_function { num.norm_hue_number() }
            else if is_fraction              { num.norm_number().clamp(0.0, 1.0) }
            else                             { num.norm_rgb_number() };
        params.push(value);

        tokenizer.get_token()?;
        let current = tokenizer.current_token();
        if current.is(TokenType::Comma) || current.is(TokenType::Slash) {
            tokenizer.get_token()?;
        }
    }

    let current = tokenizer.current_token();
    if !current.is(TokenType::RBracket) && !current.is(TokenType::End) {
        return Err(tokenizer.unexpected(TokenType::RBracket.to_string(), Some(func)));
    }
    if params.len() < min || params.len() > max {
        return Err(CssError::WrongNumberOfArguments {
            function: func.to_owned(),
            count: params.len(),
            min, max,
            pos: tokenizer.pos(),
        });
    }

    let p = |i: usize| params.get(i).copied();
    let alpha = |i: usize| p(i).unwrap_or(1.0);
    let color = match func {
        "rgb" | "rgba" => Rgba::from_rgb_f(params[0], params[1], params[2], alpha(3)),
        "hsl"          => Rgba::from_hsl_f(params[0], params[1], params[2], alpha(3)),
        "hsv"          => Rgba::from_hsv_f(params[0], params[1], params[2], alpha(3)),
        "red"          => Rgba::from_rgb_f(params[0], 0.0, 0.0, alpha(1)),
        "green"        => Rgba::from_rgb_f(0.0, params[0], 0.0, alpha(1)),
        "blue"         => Rgba::from_rgb_f(0.0, 0.0, params[0], alpha(1)),
        _              => Rgba::from_rgb_f(params[0], params[0], params[0], alpha(1)),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> CssResult<Rgba> {
    let digits: Vec<u8> = hex.chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    let nibble = |i: usize| digits[i] * 16 + digits[i];
    let byte = |i: usize| digits[2 * i] * 16 + digits[2 * i + 1];
    let color = match digits.len() {
        3 => Rgba::new(nibble(0), nibble(1), nibble(2), 255),
        4 => Rgba::new(nibble(0), nibble(1), nibble(2), nibble(3)),
        6 => Rgba::new(byte(0), byte(1), byte(2), 255),
        8 => Rgba::new(byte(0), byte(1), byte(2), byte(3)),
        _ => return Err(CssError::Unconvertible { value: format!("#{}", hex), target: "HEX-RGB value" }),
    };
    Ok(color)
}

/// Converts a color to a string that [`parse_color`] reads back to the same color.
///
/// Opaque colors become the first matching color name, or `#rrggbb`; translucent colors become `#rrggbbaa`.
pub fn color_to_string(color: Rgba) -> String {
    if color.is_opaque() {
        if let Some(name) = named::name_of(color) {
            return name.to_owned();
        }
        return format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    }
    format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
}
