//! Recognized environments (`\begin{pmatrix} .. \end{pmatrix}` ...) and the column specifications of `array`.

use crate::error::DiagnosticKind;
use crate::node::{BraceType, ColumnAlign, LineType};

/// An enumeration of recognized environments.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    /// `\begin{matrix} ... \end{matrix}`
    Matrix,
    /// `\begin{pmatrix} ... \end{pmatrix}`
    PMatrix,
    /// `\begin{bmatrix} ... \end{bmatrix}`
    BMatrix,
    /// `\begin{Bmatrix} ... \end{Bmatrix}`
    CurlyMatrix,
    /// `\begin{vmatrix} ... \end{vmatrix}`
    VMatrix,
    /// `\begin{Vmatrix} ... \end{Vmatrix}`
    DoubleVMatrix,
    /// `\begin{cases} ... \end{cases}`
    Cases,
    /// `\begin{array}{spec} ... \end{array}`
    Array,
    /// `\begin{tabular}{spec} ... \end{tabular}`
    Tabular,
    /// `\begin{aligned} ... \end{aligned}` and `align`
    Aligned,
}

impl Environment {
    /// Parses the name given to `\begin`
    pub fn try_from_str(name: &str) -> Option<Self> {
        let env = match name {
            "matrix"                                   => Environment::Matrix,
            "pmatrix"                                  => Environment::PMatrix,
            "bmatrix"                                  => Environment::BMatrix,
            "Bmatrix"                                  => Environment::CurlyMatrix,
            "vmatrix"                                  => Environment::VMatrix,
            "Vmatrix"                                  => Environment::DoubleVMatrix,
            "cases"                                    => Environment::Cases,
            "array"                                    => Environment::Array,
            "tabular"                                  => Environment::Tabular,
            "aligned" | "align" | "align*" | "aligned*" => Environment::Aligned,
            _                                          => return None,
        };
        Some(env)
    }

    /// Whether a column specification follows `\begin{..}`
    pub fn takes_column_spec(self) -> bool {
        matches!(self, Environment::Array | Environment::Tabular)
    }

    /// Delimiters drawn around the matrix
    pub fn delimiters(self) -> Option<(BraceType, BraceType)> {
        match self {
            Environment::PMatrix       => Some((BraceType::Paren, BraceType::Paren)),
            Environment::BMatrix       => Some((BraceType::Square, BraceType::Square)),
            Environment::CurlyMatrix   => Some((BraceType::Curly, BraceType::Curly)),
            Environment::VMatrix       => Some((BraceType::Single, BraceType::Single)),
            Environment::DoubleVMatrix => Some((BraceType::Double, BraceType::Double)),
            Environment::Cases         => Some((BraceType::Curly, BraceType::None)),
            _                          => None,
        }
    }

    /// Alignment of column `j` when no column specification is given
    pub fn default_alignment(self, j: usize) -> ColumnAlign {
        match self {
            Environment::Cases => ColumnAlign::Left,
            Environment::Aligned if j % 2 == 0 => ColumnAlign::Right,
            Environment::Aligned => ColumnAlign::Left,
            _ => ColumnAlign::Center,
        }
    }
}

/// Columns of an `array` as given by its specification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSpec {
    /// one entry per column
    pub alignments:     Vec<ColumnAlign>,
    /// the rule before the first column, then the rule after each column
    pub vertical_lines: Vec<LineType>,
}

/// Parses a column specification like `|l|c||r:`.
///
/// `l`, `c` and `r` add a column. `|` draws a rule, `||` a double rule, `:` a dashed rule and `::` a double-dashed
/// rule before the next column (or after the last one). Whitespace is ignored. Other characters are reported in
/// the returned list and otherwise ignored.
pub fn parse_column_spec(spec: &str) -> (ColumnSpec, Vec<DiagnosticKind>) {
    let mut columns = ColumnSpec { alignments: Vec::new(), vertical_lines: vec![LineType::None] };
    let mut errors = Vec::new();
    let mut chars = spec.chars().peekable();
    while let Some(c) = chars.next() {
        let rule = match c {
            'l' | 'c' | 'r' => {
                columns.alignments.push(match c {
                    'l' => ColumnAlign::Left,
                    'r' => ColumnAlign::Right,
                    _   => ColumnAlign::Center,
                });
                columns.vertical_lines.push(LineType::None);
                continue;
            },
            '|' if chars.peek() == Some(&'|') => {
                chars.next();
                LineType::Double
            },
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                LineType::DoubleDashed
            },
            '|' => LineType::Solid,
            ':' => LineType::Dashed,
            c if c.is_whitespace() => continue,
            c => {
                errors.push(DiagnosticKind::UnknownColumnSpec(c));
                continue;
            },
        };
        if let Some(last) = columns.vertical_lines.last_mut() {
            *last = rule;
        }
    }
    (columns, errors)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_specs() {
        use crate::node::ColumnAlign::*;
        use crate::node::LineType::*;
        let tests = [
            ("lcr", vec![Left, Center, Right], vec![None, None, None, None]),
            ("|lc||r", vec![Left, Center, Right], vec![Solid, None, Double, None]),
            ("l:c::r|", vec![Left, Center, Right], vec![None, Dashed, DoubleDashed, Solid]),
            (" c | c ", vec![Center, Center], vec![None, Solid, None]),
            ("", vec![], vec![None]),
        ];
        for (input, alignments, lines) in tests {
            eprintln!("Input: {:?}", input);
            let (spec, errors) = parse_column_spec(input);
            assert!(errors.is_empty());
            assert_eq!(spec.alignments, alignments);
            assert_eq!(spec.vertical_lines, lines);
        }
    }

    #[test]
    fn unknown_characters() {
        let (spec, errors) = parse_column_spec("lxp{3cm}");
        assert_eq!(spec.alignments.len(), 2); // the 'c' of "cm"
        assert_eq!(errors[0], DiagnosticKind::UnknownColumnSpec('x'));
        assert!(errors.len() > 1);
    }

    #[test]
    fn environments() {
        assert_eq!(Environment::try_from_str("Bmatrix"), Some(Environment::CurlyMatrix));
        assert_eq!(Environment::try_from_str("align*"), Some(Environment::Aligned));
        assert_eq!(Environment::try_from_str("figure"), None);
        assert_eq!(Environment::Aligned.default_alignment(0), ColumnAlign::Right);
        assert_eq!(Environment::Aligned.default_alignment(1), ColumnAlign::Left);
        assert!(Environment::Array.takes_column_spec());
    }
}
