//! Two children stacked above each other: fractions and their relatives.

use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::{shapes, Brush, Canvas, Pen, ScopedPaint};

use super::Node;

/// How the two children of a [`FracNode`] are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FracMode {
    /// `\frac`: numerator above a line, denominator below
    Frac,
    /// `\dfrac`: like `\frac`, children in the full font size
    DFrac,
    /// `\tfrac`: like `\frac`, children in a smaller font
    TFrac,
    /// `\sfrac`: numerator and denominator side by side, separated by a slash
    SFrac,
    /// `\stfrac`: `\sfrac` in a smaller font
    STFrac,
    /// `\stackrel`: like `\frac` without the line
    Stackrel,
    /// `\underbrace{first}{second}`: a brace below the first child, the second below the brace
    UnderBrace,
    /// `\overbrace{first}{second}`
    OverBrace,
    /// `\underset{second}{first}`: the second child in a small font below the first
    UnderSet,
    /// `\overset{second}{first}`
    OverSet,
}

impl FracMode {
    /// The mode of the instruction `name`
    pub fn from_instruction(name: &str) -> Option<Self> {
        let mode = match name {
            "frac"       => FracMode::Frac,
            "dfrac"      => FracMode::DFrac,
            "tfrac"      => FracMode::TFrac,
            "sfrac"      => FracMode::SFrac,
            "stfrac"     => FracMode::STFrac,
            "stackrel"   => FracMode::Stackrel,
            "underbrace" => FracMode::UnderBrace,
            "overbrace"  => FracMode::OverBrace,
            "underset"   => FracMode::UnderSet,
            "overset"    => FracMode::OverSet,
            _            => return None,
        };
        Some(mode)
    }

    /// Font size factors of the first and second child
    fn font_factors(self, ctx: &MathContext) -> (f64, f64) {
        let s = ctx.settings;
        match self {
            FracMode::Frac | FracMode::SFrac    => (s.frac_factor, s.frac_factor),
            FracMode::TFrac | FracMode::STFrac  => (s.frac_factor * s.frac_nested_factor, s.frac_factor * s.frac_nested_factor),
            FracMode::DFrac | FracMode::Stackrel => (1.0, 1.0),
            FracMode::UnderBrace | FracMode::OverBrace => (1.0, s.underbrace_factor),
            FracMode::UnderSet | FracMode::OverSet   => (1.0, s.underset_factor),
        }
    }
}

/// See [`FracMode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FracNode {
    mode:   FracMode,
    first:  Box<Node>,
    second: Box<Node>,
}

/// Positions of the children relative to the node's origin
struct FracLayout {
    env1:  Environment,
    env2:  Environment,
    first: (f64, f64),
    second: (f64, f64),
    size:  NodeSize,
    /// horizontal fraction line or slash: `(x1, y1, x2, y2)`
    line:  Option<(f64, f64, f64, f64)>,
    /// horizontal brace: center x, center y, width, height, rotated by 180°
    brace: Option<(f64, f64, f64, f64, bool)>,
}

impl FracNode {
    /// Creates the node; `first` is the numerator, or the main child of the brace and set modes.
    pub fn new(mode: FracMode, first: Node, second: Node) -> Self {
        Self { mode, first: Box::new(first), second: Box::new(second) }
    }

    /// The arrangement
    pub fn mode(&self) -> FracMode {
        self.mode
    }

    /// The numerator, or the main child
    pub fn numerator(&self) -> &Node {
        &self.first
    }

    /// The denominator, or the annotation
    pub fn denominator(&self) -> &Node {
        &self.second
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> FracLayout {
        let (f1, f2) = self.mode.font_factors(ctx);
        let env1 = env.scaled(f1);
        let env2 = env.scaled(f2);
        let s1 = self.first.compute_size(&env1, ctx, None);
        let s2 = self.second.compute_size(&env2, ctx, None);

        let a = ctx.strikeout_pos(env);
        let xh = ctx.x_height(env);
        let shift = xh * ctx.settings.frac_shift_factor;
        let xw = ctx.loose_rect(env, "x").width;

        let mut layout = FracLayout {
            env1,
            env2,
            first: (0.0, 0.0),
            second: (0.0, 0.0),
            size: NodeSize { strikeout_pos: a, ..NodeSize::default() },
            line: None,
            brace: None,
        };

        match self.mode {
            FracMode::Frac | FracMode::DFrac | FracMode::TFrac | FracMode::Stackrel => {
                let width = s1.width.max(s2.width) + xw;
                layout.first = ((width - s1.width) / 2.0, -a - shift - s1.descent());
                layout.second = ((width - s2.width) / 2.0, -a + shift + s2.baseline_height);
                layout.size.width = width;
                layout.size.baseline_height = a + shift + s1.overall_height;
                layout.size.overall_height = s1.overall_height + s2.overall_height + 2.0 * shift;
                if self.mode != FracMode::Stackrel {
                    layout.line = Some((xw / 4.0, -a, width - xw / 4.0, -a));
                }
            },
            FracMode::SFrac | FracMode::STFrac => {
                layout.first = (0.0, -a - s1.descent());
                layout.second = (s1.width + xw, -a + s2.baseline_height);
                layout.size.width = s1.width + xw + s2.width;
                layout.size.baseline_height = a + s1.overall_height;
                layout.size.overall_height = s1.overall_height + s2.overall_height;
                layout.line = Some((s1.width, -a + s2.overall_height, s1.width + xw, -a - s1.overall_height));
            },
            FracMode::UnderBrace | FracMode::OverBrace => {
                let sep = ctx.settings.underbrace_separation_xfactor * xh;
                let brace_height = ctx.settings.underbrace_braceheight_xfactor * ctx.tight_rect(env, "M").height;
                let width = s1.width.max(s2.width);
                layout.first = ((width - s1.width) / 2.0, 0.0);
                layout.size.width = width;
                layout.size.overall_height = s1.overall_height + sep + brace_height + s2.overall_height;
                if self.mode == FracMode::UnderBrace {
                    let ybrace = s1.descent() + sep + brace_height / 2.0;
                    layout.brace = Some((width / 2.0, ybrace, s1.width, brace_height, false));
                    layout.second = ((width - s2.width) / 2.0, s1.descent() + sep + brace_height + s2.baseline_height);
                    layout.size.baseline_height = s1.baseline_height;
                } else {
                    let ybrace = -s1.baseline_height - sep - brace_height / 2.0;
                    layout.brace = Some((width / 2.0, ybrace, s1.width, brace_height, true));
                    layout.second = ((width - s2.width) / 2.0, -s1.baseline_height - sep - brace_height - s2.descent());
                    layout.size.baseline_height = s1.baseline_height + sep + brace_height + s2.overall_height;
                }
            },
            FracMode::UnderSet | FracMode::OverSet => {
                let gap = xh / 6.0;
                let width = s1.width.max(s2.width);
                layout.first = ((width - s1.width) / 2.0, 0.0);
                layout.size.width = width;
                layout.size.overall_height = s1.overall_height + gap + s2.overall_height;
                if self.mode == FracMode::UnderSet {
                    layout.second = ((width - s2.width) / 2.0, s1.descent() + gap + s2.baseline_height);
                    layout.size.baseline_height = s1.baseline_height;
                } else {
                    layout.second = ((width - s2.width) / 2.0, -s1.baseline_height - gap - s2.descent());
                    layout.size.baseline_height = s1.baseline_height + gap + s2.overall_height;
                }
            },
        }
        layout
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        let lw = ctx.line_width(env);
        {
            let mut paint = ScopedPaint::new(canvas);
            paint.set_pen(Pen::new(env.color, lw));
            if let Some((x1, y1, x2, y2)) = layout.line {
                paint.draw_line(x + x1, y + y1, x + x2, y + y2);
            }
            if let Some((xc, yc, width, height, rotated)) = layout.brace {
                paint.set_pen(Pen::none());
                paint.set_brush(Brush::Solid(env.color));
                paint.translate(x + xc, y + yc);
                if rotated {
                    paint.rotate(180.0);
                }
                paint.draw_path(&shapes::hbrace_path(0.0, 0.0, width, height, lw));
            }
        }
        self.first.draw(canvas, x + layout.first.0, y + layout.first.1, &layout.env1, ctx, None);
        self.second.draw(canvas, x + layout.second.0, y + layout.second.1, &layout.env2, ctx, None);
        x + layout.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        match self.mode {
            FracMode::Frac | FracMode::DFrac | FracMode::TFrac | FracMode::SFrac | FracMode::STFrac => {
                html.push_str("<sup>");
                let ok1 = self.first.to_html(html, env, default, fonts);
                html.push_str("</sup>&frasl;<sub>");
                let ok2 = self.second.to_html(html, env, default, fonts);
                html.push_str("</sub>");
                ok1 && ok2
            },
            _ => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};
    use crate::render::bbox::BBoxCanvas;

    fn frac(mode: FracMode, a: &str, b: &str) -> FracNode {
        FracNode::new(mode, text(a), text(b))
    }

    #[test]
    fn fraction_size() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let s1 = text("1").compute_size(&env, &ctx, None);
        let s2 = text("xy").compute_size(&env, &ctx, None);
        let shift = ctx.x_height(&env) * settings.frac_shift_factor;
        let size = frac(FracMode::Frac, "1", "xy").size(&env, &ctx);
        assert!(close(size.width, s1.width.max(s2.width) + ctx.loose_rect(&env, "x").width));
        assert!(close(size.baseline_height, ctx.strikeout_pos(&env) + shift + s1.overall_height));
        assert!(close(size.overall_height, s1.overall_height + s2.overall_height + 2.0 * shift));

        let tfrac = frac(FracMode::TFrac, "1", "xy").size(&env, &ctx);
        assert!(tfrac.overall_height < size.overall_height);
        let stackrel = frac(FracMode::Stackrel, "1", "xy").size(&env, &ctx);
        assert_eq!(stackrel, size);
    }

    #[test]
    fn side_by_side() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let s1 = text("1").compute_size(&env, &ctx, None);
        let s2 = text("2").compute_size(&env, &ctx, None);
        let size = frac(FracMode::SFrac, "1", "2").size(&env, &ctx);
        assert!(close(size.width, s1.width + s2.width + ctx.loose_rect(&env, "x").width));
        assert!(close(size.overall_height, s1.overall_height + s2.overall_height));
    }

    #[test]
    fn braces_and_sets() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let main = text("a+b").compute_size(&env, &ctx, None);
        for mode in [FracMode::UnderBrace, FracMode::UnderSet] {
            eprintln!("Input: {:?}", mode);
            let size = frac(mode, "a+b", "n").size(&env, &ctx);
            assert!(close(size.baseline_height, main.baseline_height));
            assert!(size.descent() > main.descent());
        }
        for mode in [FracMode::OverBrace, FracMode::OverSet] {
            eprintln!("Input: {:?}", mode);
            let size = frac(mode, "a+b", "n").size(&env, &ctx);
            assert!(close(size.descent(), main.descent()));
            assert!(size.baseline_height > main.baseline_height);
        }
    }

    #[test]
    fn draws_within_box() {
        let modes = [
            FracMode::Frac, FracMode::DFrac, FracMode::TFrac, FracMode::SFrac, FracMode::STFrac, FracMode::Stackrel,
            FracMode::UnderBrace, FracMode::OverBrace, FracMode::UnderSet, FracMode::OverSet,
        ];
        for mode in modes {
            eprintln!("Input: {:?}", mode);
            assert_draws_within_box(&Node::Frac(frac(mode, "a+b", "gy")), &math_env(), 1e-6);
        }
    }

    #[test]
    fn line_at_strikeout() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let node = frac(FracMode::Frac, "", "");
        let mut canvas = BBoxCanvas::new(&metrics);
        node.draw(&mut canvas, 0.0, 0.0, &env, &ctx);
        let ink = canvas.finish().unwrap();
        assert!(close(ink.y_min, -ctx.strikeout_pos(&env)));
        assert!(close(ink.height(), 0.0));
    }

    #[test]
    fn html() {
        let env = Environment::default();
        let mut html = String::new();
        assert!(frac(FracMode::Frac, "1", "2").to_html(&mut html, &env, &env, &fonts()));
        assert_eq!(html, "<sup><span style=\"font-size: 10pt;\">1</span></sup>&frasl;<sub><span style=\"font-size: 10pt;\">2</span></sub>");
        assert!(!frac(FracMode::UnderBrace, "1", "2").to_html(&mut html, &env, &env, &fonts()));
    }
}
