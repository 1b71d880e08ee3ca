//! Producing tokens for the CSS-value parsers
use std::fmt;

use crate::error::{CssError, CssResult};

/// Kind of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    /// End of input
    End,
    /// An identifier, e.g. `rgb`, `to` or `salmon`
    Name,
    /// A number with an optional unit, e.g. `50%`, `1.5turn`
    Number,
    /// The digits following a `#`
    HexString,
    /// `(`
    LBracket,
    /// `)`
    RBracket,
    /// `,`
    Comma,
    /// `/`
    Slash,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            TokenType::End => "END",
            TokenType::Name => "NAME",
            TokenType::Number => "NUMBER",
            TokenType::HexString => "HEXSTRING",
            TokenType::LBracket => "'('",
            TokenType::RBracket => "')'",
            TokenType::Comma => "','",
            TokenType::Slash => "'/'",
        };
        f.write_str(s)
    }
}

/// A token of a CSS value. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// kind of the token
    pub kind: TokenType,
    /// the name for [`TokenType::Name`], the digits for [`TokenType::HexString`], the unit for [`TokenType::Number`]
    pub text: String,
    /// the value of a [`TokenType::Number`]
    pub number: f64,
}

impl Token {
    fn simple(kind: TokenType) -> Self {
        Self { kind, text: String::new(), number: 0.0 }
    }

    fn with_text(kind: TokenType, text: String) -> Self {
        Self { kind, text, number: 0.0 }
    }

    fn number(number: f64, unit: String) -> Self {
        Self { kind: TokenType::Number, text: unit, number }
    }

    /// Checks the token kind
    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    /// Trimmed, lower-case text of the token
    pub fn norm_text(&self) -> String {
        self.text.trim().to_lowercase()
    }

    /// Checks whether this is a [`TokenType::Name`] equal to `name` (case-insensitive)
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenType::Name && self.norm_text() == name
    }

    /// Reads the token as a number with unit
    pub fn as_number_with_unit(&self) -> Option<NumberWithUnit> {
        match self.kind {
            TokenType::Number => Some(NumberWithUnit::new(self.number, &self.text)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenType::Name => write!(f, "NAME({})", self.text),
            TokenType::HexString => write!(f, "HEXSTRING(#{})", self.text),
            TokenType::Number => write!(f, "NUMBER({}{})", self.number, self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// A number followed by an optional unit, e.g. `45deg` or `50%`.
/// The unit is stored trimmed and in lower case.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberWithUnit {
    /// the numeric value as written
    pub number: f64,
    /// the unit, empty if none
    pub unit: String,
}

impl NumberWithUnit {
    /// Creates a number with the given unit (normalized to lower case)
    pub fn new(number: f64, unit: &str) -> Self {
        Self { number, unit: unit.trim().to_lowercase() }
    }

    /// Converts the number to a plain value: percentages to fractions, angles to degrees.
    pub fn norm_number(&self) -> f64 {
        match self.unit.as_str() {
            "%"    => self.number / 100.0,
            "rad"  => self.number / std::f64::consts::PI * 180.0,
            "turn" => self.number * 360.0,
            "grad" => self.number / 400.0 * 360.0,
            _      => self.number,
        }
    }

    /// Converts the number to a color channel in `[0, 1]`: percentages are fractions, plain numbers are in `0..255`.
    pub fn norm_rgb_number(&self) -> f64 {
        let v = match self.unit.as_str() {
            "%" => self.number / 100.0,
            _   => self.number / 255.0,
        };
        v.clamp(0.0, 1.0)
    }

    /// Converts the number to a hue, expressed as a fraction of a full turn in `[0, 1)`.
    /// Plain numbers and `deg` are degrees.
    pub fn norm_hue_number(&self) -> f64 {
        let turns = match self.unit.as_str() {
            "%"    => self.number / 100.0,
            "rad"  => self.number / (2.0 * std::f64::consts::PI),
            "turn" => self.number,
            "grad" => self.number / 400.0,
            _      => self.number / 360.0,
        };
        turns.rem_euclid(1.0)
    }
}

/// Scanner over a CSS value.
///
/// The scanner position can always be restored: [`peek_next_token`](CssTokenizer::peek_next_token)
/// looks ahead without consuming anything and [`get_token`](CssTokenizer::get_token) commits.
#[derive(Clone, Debug)]
pub struct CssTokenizer<'a> {
    input:   &'a str,
    pos:     usize,
    current: Token,
}

impl<'a> CssTokenizer<'a> {
    /// Creates a tokenizer positioned before the first token.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, current: Token::simple(TokenType::End) }
    }

    /// Byte position of the scanner in the input
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The last token returned by [`get_token`](CssTokenizer::get_token)
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the next token without consuming input.
    pub fn peek_next_token(&self) -> CssResult<Token> {
        self.scan().map(|(token, _)| token)
    }

    /// Consumes and returns the next token; it becomes the current token.
    pub fn get_token(&mut self) -> CssResult<Token> {
        let (token, end) = self.scan()?;
        self.pos = end;
        self.current = token.clone();
        Ok(token)
    }

    /// Scans one token starting at the current position; returns it along with the position following it.
    /// Does not modify `self`.
    fn scan(&self) -> CssResult<(Token, usize)> {
        let rest = &self.input[self.pos ..];
        let mut chars = rest.char_indices().peekable();

        // skip whitespace
        while chars.peek().map_or(false, |&(_, c)| c.is_whitespace()) {
            chars.next();
        }

        let (start, first) = match chars.next() {
            None | Some((_, '\0')) => return Ok((Token::simple(TokenType::End), self.input.len())),
            Some(first) => first,
        };
        let at = |offset: usize| self.pos + offset;
        let after = |offset: usize, c: char| self.pos + offset + c.len_utf8();

        let simple = match first {
            ',' => Some(TokenType::Comma),
            '(' => Some(TokenType::LBracket),
            ')' => Some(TokenType::RBracket),
            '/' => Some(TokenType::Slash),
            _ => None,
        };
        if let Some(kind) = simple {
            return Ok((Token::simple(kind), after(start, first)));
        }

        if first == '#' {
            let mut end = after(start, first);
            let mut hex = String::new();
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_ascii_hexdigit() { break; }
                hex.push(c);
                end = after(i, c);
                chars.next();
            }
            if hex.is_empty() {
                return Err(CssError::MissingHexDigits { pos: end });
            }
            return Ok((Token::with_text(TokenType::HexString, hex), end));
        }

        if first.is_ascii_digit() || first == '+' || first == '-' || first == '.' {
            let mut end = after(start, first);
            let mut num = String::new();
            num.push(first);
            while let Some(&(i, c)) = chars.peek() {
                if !(c.is_ascii_digit() || c == '.') { break; }
                num.push(c);
                end = after(i, c);
                chars.next();
            }
            let mut unit = String::new();
            while let Some(&(i, c)) = chars.peek() {
                if !(c.is_alphabetic() || c == '%' || c == '°') { break; }
                unit.push(c);
                end = after(i, c);
                chars.next();
            }
            // a lone sign or dot reads as zero
            let number = num.parse::<f64>().unwrap_or(0.0);
            return Ok((Token::number(number, unit), end));
        }

        if first.is_alphabetic() {
            let mut end = after(start, first);
            let mut name = String::new();
            name.push(first);
            while let Some(&(i, c)) = chars.peek() {
                if !(c.is_alphanumeric() || c == '-' || c == '_' || c == '.') { break; }
                name.push(c);
                end = after(i, c);
                chars.next();
            }
            return Ok((Token::with_text(TokenType::Name, name), end));
        }

        Err(CssError::UnexpectedCharacter { character: first, pos: at(start) })
    }

    /// Error for an unexpected current token
    pub(crate) fn unexpected(&self, expected: impl Into<String>, context: Option<&str>) -> CssError {
        CssError::UnexpectedToken {
            expected: expected.into(),
            found: self.current.to_string(),
            pos: self.pos,
            context: context.map(str::to_owned),
        }
    }
}

/// Reads a single number with an optional unit, e.g. `-100.08grad`.
pub fn read_number_with_unit(input: &str) -> CssResult<NumberWithUnit> {
    let mut tokenizer = CssTokenizer::new(input);
    tokenizer.get_token()?;
    let number = tokenizer.current_token()
        .as_number_with_unit()
        .ok_or_else(|| tokenizer.unexpected(TokenType::Number.to_string(), None))?;
    if !tokenizer.get_token()?.is(TokenType::End) {
        return Err(tokenizer.unexpected(TokenType::End.to_string(), None));
    }
    Ok(number)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenType> {
        let mut tokenizer = CssTokenizer::new(input);
        let mut out = Vec::new();
        loop {
            let token = tokenizer.get_token().unwrap();
            if token.is(TokenType::End) { break; }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn lex_tokens() {
        use TokenType::*;
        let tests = [
            ("rgb(1, 2 ,3)",       vec![Name, LBracket, Number, Comma, Number, Comma, Number, RBracket]),
            ("  #fff ",            vec![HexString]),
            ("hsl(1 2 3 / 50%)",   vec![Name, LBracket, Number, Number, Number, Slash, Number, RBracket]),
            ("linear-gradient",    vec![Name]),
            ("",                   vec![]),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(kinds(input), expected);
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokenizer = CssTokenizer::new("red , blue");
        let peeked = tokenizer.peek_next_token().unwrap();
        assert_eq!(tokenizer.pos(), 0);
        let got = tokenizer.get_token().unwrap();
        assert_eq!(peeked, got);
        assert!(got.is_name("red"));
        assert!(tokenizer.peek_next_token().unwrap().is(TokenType::Comma));
        assert!(tokenizer.current_token().is_name("red"));
    }

    #[test]
    fn lex_numbers_with_units() {
        let mut tokenizer = CssTokenizer::new("-100.08grad 50% 45° .5");
        let expected = [(-100.08, "grad"), (50., "%"), (45., "°"), (0.5, "")];
        for (number, unit) in expected {
            let token = tokenizer.get_token().unwrap();
            assert_eq!(token.kind, TokenType::Number);
            assert_eq!(token.number, number);
            assert_eq!(token.text, unit);
        }
    }

    #[test]
    fn lex_errors() {
        let mut tokenizer = CssTokenizer::new("# 12");
        assert!(matches!(tokenizer.get_token(), Err(CssError::MissingHexDigits { .. })));

        let mut tokenizer = CssTokenizer::new("  @");
        assert_eq!(
            tokenizer.get_token(),
            Err(CssError::UnexpectedCharacter { character: '@', pos: 2 })
        );
    }

    #[test]
    fn read_numbers() {
        let tests = [
            ("100",          100.0,   ""),
            ("100%",         100.0,   "%"),
            ("-100.08grad", -100.08,  "grad"),
            ("+100.08grad",  100.08,  "grad"),
            ("1.5 TURN",     1.5,     ""),
        ];
        for (input, number, unit) in tests.iter().take(4) {
            eprintln!("Input: {:?}", input);
            let n = read_number_with_unit(input).unwrap();
            assert_eq!(n.number, *number);
            assert_eq!(n.unit, *unit);
        }
        // a unit must be attached to its number
        assert!(read_number_with_unit(tests[4].0).is_err());
    }

    #[test]
    fn normalize_numbers() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(NumberWithUnit::new(50., "%").norm_number(), 0.5));
        assert!(close(NumberWithUnit::new(std::f64::consts::PI, "rad").norm_number(), 180.));
        assert!(close(NumberWithUnit::new(0.5, "turn").norm_number(), 180.));
        assert!(close(NumberWithUnit::new(200., "grad").norm_number(), 180.));

        assert!(close(NumberWithUnit::new(510., "").norm_rgb_number(), 1.0));
        assert!(close(NumberWithUnit::new(51., "").norm_rgb_number(), 0.2));
        assert!(close(NumberWithUnit::new(20., "%").norm_rgb_number(), 0.2));

        assert!(close(NumberWithUnit::new(180., "deg").norm_hue_number(), 0.5));
        assert!(close(NumberWithUnit::new(540., "").norm_hue_number(), 0.5));
        assert!(close(NumberWithUnit::new(-90., "").norm_hue_number(), 0.75));
        assert!(close(NumberWithUnit::new(1.25, "turn").norm_hue_number(), 0.25));
        assert!(close(NumberWithUnit::new(200., "GRAD").norm_hue_number(), 0.5));
    }
}
