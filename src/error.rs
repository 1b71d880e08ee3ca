//! Defines the error types of the crate, split by how they are reported.
//!   - [`CssError`] : fatal errors of the CSS-value scanner and the color/gradient parsers. They are returned as [`Result`]s.
//!   - [`Diagnostic`] : recoverable errors found while building a formula's node tree. They never abort parsing ; the parser
//!     collects them in a list and puts a [`Node::Noop`](crate::node::Node::Noop) placeholder in the tree.
//!   - [`FontError`] : errors having to do with a font file handed to one of the font backends.

use std::fmt;

/// Result type for the [`CssError`]
pub type CssResult<T> = ::std::result::Result<T, CssError>;
/// Result type for the [`FontError`]
pub type FontResult<T> = ::std::result::Result<T, FontError>;

/// Errors raised while scanning or interpreting a CSS-like value (`#f0f`, `rgb(...)`, `linear-gradient(...)`).
#[derive(Debug, Clone, PartialEq)]
pub enum CssError {
    /// A character which cannot start any token.
    UnexpectedCharacter {
        /// offending character
        character: char,
        /// character position in the input
        pos: usize,
    },
    /// A `#` that is not followed by any hexadecimal digit.
    MissingHexDigits {
        /// character position in the input
        pos: usize,
    },
    /// The scanner produced a valid token, but not the one the parser expected at this point.
    UnexpectedToken {
        /// description of what was expected
        expected: String,
        /// description of the token found instead
        found: String,
        /// character position in the input
        pos: usize,
        /// what was being parsed, if known
        context: Option<String>,
    },
    /// Input continues after a complete term, or a term is not valid where it stands (e.g. `to left right top`).
    UnexpectedTerm {
        /// the rejected term
        term: String,
        /// character position in the input
        pos: usize,
    },
    /// A color function was called with too few or too many arguments.
    WrongNumberOfArguments {
        /// name of the function (e.g. `rgb`)
        function: String,
        /// number of arguments found
        count: usize,
        /// minimum number of arguments accepted
        min: usize,
        /// maximum number of arguments accepted
        max: usize,
        /// character position in the input
        pos: usize,
    },
    /// A complete, well-formed value that cannot be converted (e.g. a 5-digit hex color).
    Unconvertible {
        /// the value that could not be converted
        value: String,
        /// the type it was converted to
        target: &'static str,
    },
    /// A name that is not in the named-color table.
    UnknownColorName(String),
}

impl fmt::Display for CssError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::CssError::*;
        match *self {
            UnexpectedCharacter { character, pos } =>
                write!(f, "found unexpected character '{}' at pos.{}", character, pos),
            MissingHexDigits { pos } =>
                write!(f, "did not find HEX digits after a HASH '#' at pos.{}", pos),
            UnexpectedToken { ref expected, ref found, pos, context: Some(ref context) } =>
                write!(f, "unexpected token at pos.{} (context: {}): expected {}, but found {}", pos, context, expected, found),
            UnexpectedToken { ref expected, ref found, pos, context: None } =>
                write!(f, "unexpected token at pos.{}: expected {}, but found {}", pos, expected, found),
            UnexpectedTerm { ref term, pos } =>
                write!(f, "unexpected term '{}' at pos.{}", term, pos),
            WrongNumberOfArguments { ref function, count, min, max, pos } if min == max =>
                write!(f, "function '{}' takes {} arguments, but {} were given (pos.{})", function, min, count, pos),
            WrongNumberOfArguments { ref function, count, min, max, pos } =>
                write!(f, "function '{}' takes {}..{} arguments, but {} were given (pos.{})", function, min, max, count, pos),
            Unconvertible { ref value, target } =>
                write!(f, "unable to convert '{}' to {}", value, target),
            UnknownColorName(ref name) =>
                write!(f, "unknown color name '{}'", name),
        }
    }
}

impl std::error::Error for CssError {}

/// Errors having to do with a font file provided to a font backend.
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// The bytes could not be parsed as an OpenType/TrueType font.
    Unparsable(String),
    /// No loaded face has this family name.
    UnknownFamily(String),
    /// The font file could not be read.
    Io(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::FontError::*;
        match *self {
            Unparsable(ref reason) => write!(f, "unable to parse font: {}", reason),
            UnknownFamily(ref family) => write!(f, "no loaded font with family '{}'", family),
            Io(ref reason) => write!(f, "unable to read font file: {}", reason),
        }
    }
}

impl std::error::Error for FontError {}

impl From<std::io::Error> for FontError {
    fn from(e: std::io::Error) -> Self {
        FontError::Io(e.to_string())
    }
}

/// What kind of recoverable problem a [`Diagnostic`] reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// `\foo` is neither a known instruction nor a known symbol.
    UnknownInstruction(String),
    /// `\begin{foo}` names an environment we do not support.
    UnknownEnvironment(String),
    /// `\end{foo}` without a matching `\begin{foo}`.
    UnmatchedEnd(String),
    /// `\begin{foo}` that is never closed.
    UnclosedEnvironment(String),
    /// A `}` without an opening `{`, or a group that is never closed.
    UnbalancedBraces,
    /// A character of an array column specification that is not one of `l c r | :` or whitespace.
    UnknownColumnSpec(char),
    /// A matrix row has a different number of cells than the first row.
    WrongNumberOfCells {
        /// 0-based row index
        row: usize,
        /// cells found in that row
        found: usize,
        /// cells in the first row
        expected: usize,
    },
    /// An instruction expected an argument (e.g. `\frac{a}` or `\sqrt` at the end of input).
    MissingArgument(String),
    /// `\left` / `\right` followed by something that is not a delimiter.
    UnknownDelimiter(String),
    /// `\textcolor{..}` whose color argument failed to parse.
    InvalidColor(String),
    /// `\fontsize{..}` whose argument is not a positive number.
    InvalidFontSize(String),
    /// `\right` without `\left`, or `\left` without `\right`.
    UnmatchedDelimiter,
}

/// A recoverable problem found while building the node tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// what went wrong
    pub kind: DiagnosticKind,
    /// byte offset in the parsed string where the problem was detected
    pub pos: usize,
}

impl Diagnostic {
    /// Creates a diagnostic at the given byte offset.
    pub fn new(kind: DiagnosticKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::DiagnosticKind::*;
        match *self {
            UnknownInstruction(ref name) => write!(f, "unknown instruction \\{}", name),
            UnknownEnvironment(ref name) => write!(f, "unknown environment '{}'", name),
            UnmatchedEnd(ref name) => write!(f, "\\end{{{}}} without \\begin{{{}}}", name, name),
            UnclosedEnvironment(ref name) => write!(f, "\\begin{{{}}} is never closed", name),
            UnbalancedBraces => write!(f, "unbalanced braces"),
            UnknownColumnSpec(c) => write!(f, "unknown character '{}' in column specification", c),
            WrongNumberOfCells { row, found, expected } =>
                write!(f, "row {} has {} cells, but the first row has {}", row, found, expected),
            MissingArgument(ref name) => write!(f, "missing argument for \\{}", name),
            UnknownDelimiter(ref name) => write!(f, "'{}' is not a delimiter", name),
            InvalidColor(ref reason) => write!(f, "invalid color: {}", reason),
            InvalidFontSize(ref size) => write!(f, "invalid font size '{}'", size),
            UnmatchedDelimiter => write!(f, "unmatched \\left / \\right"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (at byte {})", self.kind, self.pos)
    }
}
