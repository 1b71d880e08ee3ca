//! Instructions changing the style of text: fonts, weights, colors, sizes.

use crate::environment::{FontRole, LetterCase};
use crate::node::EnvChange;

/// What a style instruction applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope {
    /// the following argument, e.g. `\textbf{..}`
    Argument,
    /// the rest of the enclosing group, e.g. `\bf`
    Switch,
}

/// Changes of the style instruction `name`, and what they apply to.
/// `base_size` is the font size `\normalsize` stands for.
pub fn style_instruction(name: &str, base_size: f64) -> Option<(Vec<EnvChange>, StyleScope)> {
    use self::EnvChange::*;
    use self::StyleScope::*;

    let upright_font = |role: FontRole| vec![Font(role), Italic(false)];
    let text_font = |role: FontRole| vec![LeaveMath, Font(role)];
    let sized = |factor: f64| (vec![FontSize(base_size * factor)], Switch);

    let style = match name {
        // fonts of text
        "textrm" | "textnormal"    => (text_font(FontRole::Roman), Argument),
        "text" | "mbox" | "hbox"   => (vec![LeaveMath], Argument),
        "textsf"                   => (text_font(FontRole::Sans), Argument),
        "texttt"                   => (text_font(FontRole::Typewriter), Argument),
        "textbf"                   => (vec![Bold(true)], Argument),
        "textit"                   => (vec![Italic(true)], Argument),
        "textup"                   => (vec![Italic(false)], Argument),
        "textmd"                   => (vec![Bold(false)], Argument),
        "textsc"                   => (vec![SmallCaps], Argument),
        "emph"                     => (vec![ToggleItalic], Argument),
        "underlined"               => (vec![Underlined], Argument),
        "overlined"                => (vec![Overline], Argument),
        "strike"                   => (vec![Strike], Argument),
        "uppercase"                => (vec![LetterCase(self::LetterCase::Upper)], Argument),
        "lowercase"                => (vec![LetterCase(self::LetterCase::Lower)], Argument),

        // fonts of math
        "mathrm" | "operatorname"  => (upright_font(FontRole::Roman), Argument),
        "mathsf"                   => (upright_font(FontRole::Sans), Argument),
        "mathtt"                   => (upright_font(FontRole::Typewriter), Argument),
        "mathbb"                   => (upright_font(FontRole::Blackboard), Argument),
        "mathcal"                  => (upright_font(FontRole::Caligraphic), Argument),
        "mathscr"                  => (upright_font(FontRole::Script), Argument),
        "mathfrak"                 => (upright_font(FontRole::Fraktur), Argument),
        "mathit"                   => (vec![Italic(true)], Argument),
        "mathbf"                   => (vec![Bold(true), Italic(false)], Argument),
        "boldsymbol" | "bm"        => (vec![Bold(true)], Argument),
        "mathop"                   => (vec![Italic(false)], Argument),
        "ensuremath"               => (vec![EnterMath], Argument),

        // switches
        "rm" | "rmfamily"          => (upright_font(FontRole::Roman), Switch),
        "sf" | "sffamily"          => (upright_font(FontRole::Sans), Switch),
        "tt" | "ttfamily"          => (upright_font(FontRole::Typewriter), Switch),
        "bf" | "bfseries"          => (vec![Bold(true)], Switch),
        "md" | "mdseries"          => (vec![Bold(false)], Switch),
        "it" | "itshape"           => (vec![Italic(true)], Switch),
        "up" | "upshape"           => (vec![Italic(false)], Switch),
        "sc" | "scshape"           => (vec![SmallCaps], Switch),
        "normalfont"               => (vec![Font(FontRole::Roman), Bold(false), Italic(false)], Switch),

        // sizes, relative to a 10pt document
        "tiny"                     => sized(0.5),
        "scriptsize"               => sized(0.7),
        "footnotesize"             => sized(0.8),
        "small"                    => sized(0.9),
        "normalsize"               => sized(1.0),
        "large"                    => sized(1.2),
        "Large"                    => sized(1.44),
        "LARGE"                    => sized(1.728),
        "huge"                     => sized(2.074),
        "Huge"                     => sized(2.488),

        // math styles only change the size
        "displaystyle" | "textstyle" => sized(1.0),
        "scriptstyle"              => sized(0.75),
        "scriptscriptstyle"        => sized(0.5),
        _                          => return None,
    };
    Some(style)
}

/// Minimum heights (in font heights) of the `\big` family, with the side of the delimiter
/// (`Some(true)` for opening, `Some(false)` for closing, `None` to decide from the delimiter).
pub fn big_instruction(name: &str) -> Option<(f64, Option<bool>)> {
    let (size, side) = match name.strip_prefix("big").or_else(|| name.strip_prefix("Big")) {
        Some(rest) => {
            let large = name.starts_with('B');
            let (double, side) = match rest.strip_prefix('g') {
                Some(side) => (true, side),
                None => (false, rest),
            };
            let size = match (large, double) {
                (false, false) => 0.85,
                (true, false)  => 1.15,
                (false, true)  => 1.45,
                (true, true)   => 1.75,
            };
            (size, side)
        },
        None => return None,
    };
    let side = match side {
        ""  | "m" => None,
        "l"       => Some(true),
        "r"       => Some(false),
        _         => return None,
    };
    Some((size, side))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles() {
        let tests = [
            ("textbf", Some((vec![EnvChange::Bold(true)], StyleScope::Argument))),
            ("bf", Some((vec![EnvChange::Bold(true)], StyleScope::Switch))),
            ("large", Some((vec![EnvChange::FontSize(12.0)], StyleScope::Switch))),
            ("mathbb", Some((vec![EnvChange::Font(FontRole::Blackboard), EnvChange::Italic(false)], StyleScope::Argument))),
            ("scriptstyle", Some((vec![EnvChange::FontSize(7.5)], StyleScope::Switch))),
            ("displaystyle", Some((vec![EnvChange::FontSize(10.0)], StyleScope::Switch))),
            ("uppercase", Some((vec![EnvChange::LetterCase(LetterCase::Upper)], StyleScope::Argument))),
            ("alpha", None),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(style_instruction(input, 10.0), expected);
        }
    }

    #[test]
    fn big_family() {
        let tests = [
            ("big", Some((0.85, None))),
            ("Bigl", Some((1.15, Some(true)))),
            ("biggr", Some((1.45, Some(false)))),
            ("Biggm", Some((1.75, None))),
            ("bigcup", None),
            ("bigx", None),
            ("frac", None),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(big_instruction(input), expected);
        }
    }
}
