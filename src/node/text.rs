//! Runs of ordinary text.
//!
//! A run is split into segments which need different fonts: in math mode digits and brackets stay upright
//! while letters are italic, and with a simulated blackboard font letters are replaced by their double-struck
//! Unicode forms, taken from whichever font has them.

use std::borrow::Cow;

use crate::environment::{Environment, FontRole, FontSettings, LetterCase};
use crate::font::FontRequest;
use crate::layout::{MathContext, NodeSize};
use crate::render::{Canvas, Pen, ScopedPaint};
use crate::symbols::html_escape;

use super::{cover_style_lines, draw_style_lines};

/// A run of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontMode {
    AsDefined,
    ForceUpright,
    Roman,
    FallbackSymbol,
}

struct Segment {
    text: String,
    font: FontRequest,
    x:    f64,
}

struct TextLayout {
    segments: Vec<Segment>,
    size:     NodeSize,
}

/// Characters drawn upright in math mode wherever they appear
fn always_upright(c: char) -> bool {
    c.is_ascii_digit() || matches!(c,
        '(' | '[' | '|' | ']' | ')' | '<' | '>' | '{' | '}' |
        '\u{2329}' | '\u{232A}' | '\u{2308}' | '\u{2309}' | '\u{230A}' | '\u{230B}')
}

/// Characters drawn upright in math mode when they do not start the run (decimal separators)
fn upright_inside(c: char) -> bool {
    always_upright(c) || c == '.' || c == ','
}

/// The double-struck form of `c`, if Unicode has one
pub(crate) fn blackboard_char(c: char) -> Option<char> {
    let code = match c {
        'C' => 0x2102,
        'H' => 0x210D,
        'N' => 0x2115,
        'P' => 0x2119,
        'Q' => 0x211A,
        'R' => 0x211D,
        'Z' => 0x2124,
        'A' ..= 'Z' => 0x1D538 + (c as u32 - 'A' as u32),
        'a' ..= 'z' => 0x1D552 + (c as u32 - 'a' as u32),
        '0' ..= '9' => 0x1D7D8 + (c as u32 - '0' as u32),
        _ => return None,
    };
    char::from_u32(code)
}

impl TextNode {
    /// Creates a run of text.
    ///
    /// Leading whitespace is dropped (unless the text is a single whitespace). `add_whitespace` appends a space if
    /// the text does not end with one, `strip_inner_whitespace` (used in math mode) removes all whitespace.
    pub fn new(text: &str, add_whitespace: bool, strip_inner_whitespace: bool) -> Self {
        let mut text: String = if strip_inner_whitespace {
            text.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            text.to_string()
        };
        while text.chars().count() > 1 && text.starts_with(char::is_whitespace) {
            text.remove(0);
        }
        if add_whitespace && !text.is_empty() && !text.ends_with(char::is_whitespace) {
            text.push(' ');
        }
        Self { text }
    }

    /// The text of the run
    pub fn text(&self) -> &str {
        &self.text
    }

    fn transformed(&self, env: &Environment) -> Cow<str> {
        match env.letter_case {
            LetterCase::Lower => Cow::Owned(self.text.to_lowercase()),
            LetterCase::Upper => Cow::Owned(self.text.to_uppercase()),
            LetterCase::AsIs if env.small_caps => Cow::Owned(self.text.to_uppercase()),
            LetterCase::AsIs => Cow::Borrowed(&self.text),
        }
    }

    fn split(text: &str, env: &Environment, ctx: &MathContext) -> Vec<(String, FontMode)> {
        let roman_math = env.inside_math && matches!(env.font, FontRole::Roman | FontRole::MathRoman);
        let blackboard = env.font == FontRole::Blackboard && ctx.fonts.blackboard_simulated;
        let roman = ctx.font(&env.exchanged_font_for_roman());
        let fallback = ctx.font(&env.exchanged_font_for(FontRole::FallbackSymbols));

        let mut parts: Vec<(String, FontMode)> = Vec::new();
        for (i, c) in text.chars().enumerate() {
            let (c, mode) = if roman_math {
                let upright = if i == 0 { always_upright(c) } else { upright_inside(c) };
                (c, if upright { FontMode::ForceUpright } else { FontMode::AsDefined })
            } else if blackboard {
                match blackboard_char(c) {
                    Some(bb) if ctx.metrics.has_glyph(&roman, bb) => (bb, FontMode::Roman),
                    Some(bb) if ctx.metrics.has_glyph(&fallback, bb) => (bb, FontMode::FallbackSymbol),
                    _ => (c, FontMode::AsDefined),
                }
            } else {
                (c, FontMode::AsDefined)
            };
            match parts.last_mut() {
                Some((part, last)) if *last == mode => part.push(c),
                _ => parts.push((c.to_string(), mode)),
            }
        }
        parts
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> TextLayout {
        let text = self.transformed(env);
        let parts = Self::split(&text, env, ctx);
        let font = ctx.font(env);
        let count = parts.len();

        let mut segments = Vec::with_capacity(count);
        let mut width = 0.0;
        let mut ascent: f64 = 0.0;
        let mut descent: f64 = 0.0;
        let mut italic_correction = 0.0;
        for (i, (part, mode)) in parts.into_iter().enumerate() {
            let font = match mode {
                FontMode::AsDefined      => font.clone(),
                FontMode::ForceUpright   => font.non_italic(),
                FontMode::Roman          => ctx.font(&env.exchanged_font_for_roman()),
                FontMode::FallbackSymbol => ctx.font(&env.exchanged_font_for(FontRole::FallbackSymbols)),
            };
            let loose = ctx.metrics.bounding_rect(&font, &part);
            let tight = ctx.metrics.tight_bounding_rect(&font, &part);
            italic_correction = match part.chars().last() {
                Some(c) if font.italic => (-ctx.metrics.right_bearing(&font, c)).max(0.0),
                _ => 0.0,
            };

            let x = width;
            // the ink of the last segment ends the run, unless it ends with spaces
            width += if i + 1 < count || part.ends_with(char::is_whitespace) { loose.width } else { tight.right() };
            ascent = ascent.max(tight.ascent());
            descent = descent.max(tight.bottom());
            segments.push(Segment { text: part, font, x });
        }

        let mut size = NodeSize {
            width,
            baseline_height: ascent,
            overall_height: ascent + descent,
            strikeout_pos: ctx.strikeout_pos(env),
            sub_super_x_correction: 0.0,
            sub_besides_x_correction: italic_correction,
        };
        cover_style_lines(&mut size, env, ctx);
        TextLayout { segments, size }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        {
            let mut paint = ScopedPaint::new(canvas);
            paint.set_pen(Pen::new(env.color, ctx.line_width(env)));
            for segment in &layout.segments {
                paint.draw_text(x + segment.x, y, &segment.text, &segment.font);
            }
        }
        draw_style_lines(canvas, x, y, layout.size.width, env, ctx);
        x + layout.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        html.push_str(&env.to_html_start(default, fonts));
        html.push_str(&html_escape(&self.transformed(env)));
        html.push_str(env.to_html_after());
        true
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env};
    use crate::node::Node;
    use crate::render::bbox::BBoxCanvas;

    #[test]
    fn construction() {
        let tests = [
            (("  abc", false, false),  "abc"),
            (("abc", true, false),     "abc "),
            (("abc ", true, false),    "abc "),
            ((" ", false, false),      " "),
            (("a b  c", false, true),  "abc"),
            (("", true, false),        ""),
        ];
        for ((input, add, strip), expected) in tests {
            eprintln!("Input: {:?} (add_whitespace = {}, strip = {})", input, add, strip);
            assert_eq!(TextNode::new(input, add, strip).text(), expected);
        }
    }

    #[test]
    fn blackboard_letters() {
        let tests = [('A', Some('\u{1D538}')), ('C', Some('\u{2102}')), ('R', Some('\u{211D}')),
                     ('b', Some('\u{1D553}')), ('1', Some('\u{1D7D9}')), ('+', None)];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(blackboard_char(input), expected);
        }
    }

    #[test]
    fn upright_digits_in_math() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let modes: Vec<FontMode> = TextNode::split("2x.5", &env, &ctx).into_iter().map(|(_, m)| m).collect();
        assert_eq!(modes, [FontMode::ForceUpright, FontMode::AsDefined, FontMode::ForceUpright]);
        let parts = TextNode::split(".5", &env, &ctx);
        assert_eq!(parts[0], (".".to_string(), FontMode::AsDefined));
        let text_env = Environment::default();
        assert_eq!(TextNode::split("2x", &text_env, &ctx).len(), 1);
    }

    #[test]
    fn blackboard_fallback() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let env = Environment::default().exchanged_font_for(FontRole::Blackboard);

        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        assert_eq!(TextNode::split("R", &env, &ctx), [("\u{211D}".to_string(), FontMode::Roman)]);

        let metrics = FixedMetrics::new().latin1_only("Serif");
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        assert_eq!(TextNode::split("R", &env, &ctx), [("\u{211D}".to_string(), FontMode::FallbackSymbol)]);

        let metrics = metrics.latin1_only("Symbols");
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        assert_eq!(TextNode::split("R", &env, &ctx), [("R".to_string(), FontMode::AsDefined)]);
    }

    #[test]
    fn size_of_a_run() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = Environment::default();

        let x = TextNode::new("x", false, false).size(&env, &ctx);
        assert!(close(x.baseline_height, ctx.x_height(&env)));
        assert!(close(x.overall_height, x.baseline_height));
        let xg = TextNode::new("xg", false, false).size(&env, &ctx);
        assert!(xg.descent() > 0.0);
        assert!(xg.width > x.width);

        // trailing spaces count with their advance
        let spaced = TextNode::new("x", true, false).size(&env, &ctx);
        assert!(close(spaced.width, ctx.loose_rect(&env, "x ").width));

        let italic = TextNode::new("f", false, false).size(&math_env(), &ctx);
        assert!(italic.sub_besides_x_correction > 0.0);
        assert_eq!(x.sub_besides_x_correction, 0.0);
    }

    #[test]
    fn draws_segments() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let node = TextNode::new("x2", false, false);
        let mut canvas = BBoxCanvas::new(&metrics);
        let end = node.draw(&mut canvas, 0.0, 0.0, &math_env(), &ctx);
        assert!(close(end, node.size(&math_env(), &ctx).width));

        for env in [Environment::default(), math_env(), Environment { small_caps: true, ..Environment::default() }] {
            eprintln!("Input: {:?}", env);
            assert_draws_within_box(&Node::Text(TextNode::new("Hello 12", false, false)), &env, 1e-9);
        }
    }

    #[test]
    fn html() {
        let mut html = String::new();
        let node = TextNode::new("a<b", false, false);
        let env = Environment { small_caps: true, ..Environment::default() };
        assert!(node.to_html(&mut html, &env, &Environment::default(), &fonts()));
        assert_eq!(html, "<span style=\"font-size: 10pt;\">A&lt;B</span>");
    }

    #[test]
    fn letter_case() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let node = TextNode::new("aB", false, false);
        let tests = [
            (LetterCase::AsIs, "aB"),
            (LetterCase::Upper, "AB"),
            (LetterCase::Lower, "ab"),
        ];
        for (case, expected) in tests {
            eprintln!("Input: {:?}", case);
            let env = Environment { letter_case: case, ..Environment::default() };
            assert_eq!(node.transformed(&env), expected);
            let reference = TextNode::new(expected, false, false).size(&Environment::default(), &ctx);
            assert!(close(node.size(&env, &ctx).width, reference.width));
        }
    }
}
