//! Parsing `linear-gradient(...)` values.
//!
//! ```text
//! linear-gradient(to left top, red, blue 30%, #0f0)
//! linear-gradient(45deg, red 10%, blue)
//! ```
//!
//! The result is expressed in object-bounding coordinates: `(0, 0)` is the top-left corner
//! and `(1, 1)` the bottom-right corner of the painted shape.

use super::color::{parse_color_at, Rgba};
use super::lexer::{CssTokenizer, TokenType};
use crate::error::{CssError, CssResult};

/// A position along the gradient line (in `[0, 1]`) and the color found there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// position on the gradient line
    pub position: f64,
    /// color at that position
    pub color: Rgba,
}

/// A linear gradient in object-bounding coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// start point of the gradient line
    pub start: (f64, f64),
    /// end point of the gradient line
    pub end: (f64, f64),
    /// stops, in increasing order of position
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// A gradient going towards `angle` (in degrees: 0 is up, 90 is right, clockwise) with no stops.
    pub fn with_angle(angle: f64) -> Self {
        let rad = angle.to_radians();
        let dx = round10(0.5 * rad.sin());
        let dy = round10(-0.5 * rad.cos());
        Self {
            start: (0.5 - dx, 0.5 - dy),
            end:   (0.5 + dx, 0.5 + dy),
            stops: Vec::new(),
        }
    }
}

fn round10(v: f64) -> f64 {
    (v * 1e10).round() / 1e10
}

/// Angle of a `to <side> [<side>]` direction
fn direction_angle(sides: &[String]) -> Option<f64> {
    let mut sides: Vec<&str> = sides.iter().map(String::as_str).collect();
    if sides.len() == 2 && (sides[0] == "top" || sides[0] == "bottom") {
        sides.swap(0, 1);
    }
    let angle = match sides.as_slice() {
        ["left"]             => 270.0,
        ["right"]            => 90.0,
        ["top"]              => 0.0,
        ["bottom"]           => 180.0,
        ["left", "top"]      => 315.0,
        ["left", "bottom"]   => 225.0,
        ["right", "top"]     => 45.0,
        ["right", "bottom"]  => 135.0,
        _                    => return None,
    };
    Some(angle)
}

const FUNCTION: &str = "linear-gradient";

/// Parses a `linear-gradient(...)` value.
pub fn parse_linear_gradient(input: &str) -> CssResult<LinearGradient> {
    let mut tokenizer = CssTokenizer::new(input);
    let first = tokenizer.get_token()?;
    if !first.is_name(FUNCTION) {
        return Err(CssError::UnexpectedTerm { term: first.to_string(), pos: tokenizer.pos() });
    }
    if !tokenizer.get_token()?.is(TokenType::LBracket) {
        return Err(tokenizer.unexpected(TokenType::LBracket.to_string(), Some(FUNCTION)));
    }
    tokenizer.get_token()?;

    let mut angle = 180.0;
    let mut has_direction = false;
    if tokenizer.current_token().is_name("to") {
        let mut sides = Vec::new();
        while tokenizer.get_token()?.is(TokenType::Name) {
            let side = tokenizer.current_token().norm_text();
            if !matches!(side.as_str(), "left" | "right" | "top" | "bottom") {
                return Err(CssError::UnexpectedTerm { term: side, pos: tokenizer.pos() });
            }
            sides.push(side);
        }
        angle = direction_angle(&sides).ok_or_else(|| CssError::UnexpectedTerm {
            term: format!("to {}", sides.join(" ")),
            pos: tokenizer.pos(),
        })?;
        if !tokenizer.current_token().is(TokenType::Comma) {
            return Err(tokenizer.unexpected(TokenType::Comma.to_string(), Some(FUNCTION)));
        }
        has_direction = true;
    } else if let Some(number) = tokenizer.current_token().as_number_with_unit() {
        angle = number.norm_number();
        if !tokenizer.get_token()?.is(TokenType::Comma) {
            return Err(tokenizer.unexpected(TokenType::Comma.to_string(), Some(FUNCTION)));
        }
        has_direction = true;
    }
    if has_direction {
        tokenizer.get_token()?;
    }

    let mut gradient = LinearGradient::with_angle(angle);
    let mut positions: Vec<Option<f64>> = Vec::new();
    loop {
        let color = parse_color_at(&mut tokenizer)?;
        tokenizer.get_token()?;

        let mut position = None;
        if let Some(number) = tokenizer.current_token().as_number_with_unit() {
            if number.unit != "%" {
                return Err(tokenizer.unexpected("a percentage", Some(FUNCTION)));
            }
            position = Some(number.number / 100.0);
            tokenizer.get_token()?;
        }
        positions.push(position);
        gradient.stops.push(GradientStop { position: 0.0, color });

        let current = tokenizer.current_token();
        if current.is(TokenType::RBracket) || current.is(TokenType::End) {
            break;
        }
        if !current.is(TokenType::Comma) {
            return Err(tokenizer.unexpected(TokenType::Comma.to_string(), Some(FUNCTION)));
        }
        tokenizer.get_token()?;
    }

    for (stop, position) in gradient.stops.iter_mut().zip(normalize_stops(&positions)) {
        stop.position = position;
    }
    Ok(gradient)
}

/// Fills in missing stop positions: the first defaults to 0, the last to 1
/// and the ones in between are spread evenly between their known neighbours.
fn normalize_stops(positions: &[Option<f64>]) -> Vec<f64> {
    let mut known: Vec<Option<f64>> = positions.to_vec();
    if let Some(first) = known.first_mut() {
        first.get_or_insert(0.0);
    }
    if known.len() > 1 {
        if let Some(last) = known.last_mut() {
            last.get_or_insert(1.0);
        }
    }

    let mut out: Vec<f64> = Vec::with_capacity(known.len());
    let mut i = 0;
    while i < known.len() {
        match known[i] {
            Some(p) => {
                out.push(p);
                i += 1;
            },
            None => {
                // known[0] and the last entry are always set, so both ends of the gap exist
                let before = out.last().copied().unwrap_or(0.0);
                let gap_end = (i..known.len()).find(|&j| known[j].is_some()).unwrap_or(known.len() - 1);
                let after = known[gap_end].unwrap_or(1.0);
                let steps = (gap_end - i + 1) as f64;
                for k in 0 .. gap_end - i {
                    out.push(before + (k + 1) as f64 * (after - before) / steps);
                }
                i = gap_end;
            },
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn directions() {
        let tests = [
            ("linear-gradient(red, blue)",                  (0.5, 0.0), (0.5, 1.0)),
            ("linear-gradient(to top, red, blue)",          (0.5, 1.0), (0.5, 0.0)),
            ("linear-gradient(to left, red, blue)",         (1.0, 0.5), (0.0, 0.5)),
            ("linear-gradient(to right, red, blue)",        (0.0, 0.5), (1.0, 0.5)),
            ("linear-gradient(90deg, red, blue)",           (0.0, 0.5), (1.0, 0.5)),
            ("linear-gradient(0.5turn, red, blue)",         (0.5, 0.0), (0.5, 1.0)),
        ];
        for (input, start, end) in tests {
            eprintln!("Input: {:?}", input);
            let gradient = parse_linear_gradient(input).unwrap();
            assert!(close(gradient.start, start), "start: {:?}", gradient.start);
            assert!(close(gradient.end, end), "end: {:?}", gradient.end);
        }
    }

    #[test]
    fn corners_in_either_order() {
        let a = parse_linear_gradient("linear-gradient(to left top, red, blue)").unwrap();
        let b = parse_linear_gradient("linear-gradient(to top left, red, blue)").unwrap();
        let c = parse_linear_gradient("linear-gradient(315deg, red, blue)").unwrap();
        assert_eq!(a, b);
        assert!(close(a.start, c.start) && close(a.end, c.end));
    }

    #[test]
    fn stops() {
        let gradient = parse_linear_gradient("linear-gradient(red, lime, blue 80%, rgb(0,0,0), white)").unwrap();
        let positions: Vec<f64> = gradient.stops.iter().map(|s| s.position).collect();
        let expected = [0.0, 0.4, 0.8, 0.9, 1.0];
        assert_eq!(positions.len(), expected.len());
        for (p, e) in positions.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "{:?}", positions);
        }
        assert_eq!(gradient.stops[0].color, Rgba::new(255, 0, 0, 255));
        assert_eq!(gradient.stops[3].color, Rgba::new(0, 0, 0, 255));

        let single = parse_linear_gradient("linear-gradient(45deg, red)").unwrap();
        assert_eq!(single.stops[0].position, 0.0);
    }

    #[test]
    fn errors() {
        let tests = [
            "radial-gradient(red, blue)",
            "linear-gradient red, blue",
            "linear-gradient(to left right top, red, blue)",
            "linear-gradient(to middle, red, blue)",
            "linear-gradient(to left red, blue)",
            "linear-gradient(red 10px, blue)",
            "linear-gradient(red blue)",
        ];
        for input in tests {
            eprintln!("Input: {:?}", input);
            assert!(parse_linear_gradient(input).is_err());
        }
    }
}
