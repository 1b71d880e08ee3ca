//! Delimiters growing with their contents: `\left( .. \right)`, `\bigl[`, `\langle` ...
//!
//! Delimiters are not drawn with glyphs but as paths, so they can take any height. They are centered on
//! the strike-out line of the font and reach at least as far above and below it as the child does.

use crate::environment::{Environment, FontSettings};
use crate::layout::constants::{
    ABSNORM_LINE_FACTOR, ANGLE_CENTER_WIDTH, BRACE_OVERSIZE_FACTOR, PAREN_CENTER_WIDTH, PAREN_FRACTION, PAREN_TOP_WIDTH,
};
use crate::layout::{MathContext, NodeSize};
use crate::render::{shapes, Brush, Canvas, Path, Pen, ScopedPaint};

use super::Node;

/// Shape of one delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BraceType {
    /// `(` `)`
    Paren,
    /// `[` `]`
    Square,
    /// `\{` `\}`
    Curly,
    /// `\langle` `\rangle`
    Angle,
    /// `\lfloor` `\rfloor`
    Floor,
    /// `\lceil` `\rceil`
    Ceil,
    /// `|`
    Single,
    /// `\|`
    Double,
    /// `\ulcorner` `\urcorner`
    TopCorner,
    /// `\llcorner` `\lrcorner`
    BottomCorner,
    /// `.`: no delimiter
    None,
}

impl BraceType {
    /// The delimiter named `name`, as written after `\left` or `\right` (without backslash for instructions).
    /// Opening and closing names give the same type.
    pub fn from_delimiter(name: &str) -> Option<Self> {
        let brace = match name {
            "(" | ")"                                   => BraceType::Paren,
            "[" | "]"                                   => BraceType::Square,
            "{" | "}" | "\\{" | "\\}" | "lbrace" | "rbrace" => BraceType::Curly,
            "<" | ">" | "langle" | "rangle"             => BraceType::Angle,
            "lfloor" | "rfloor"                         => BraceType::Floor,
            "lceil" | "rceil"                           => BraceType::Ceil,
            "|" | "vert"                                => BraceType::Single,
            "||" | "Vert" | "\\|" | "|="                => BraceType::Double,
            "ulcorner" | "urcorner"                     => BraceType::TopCorner,
            "llcorner" | "lrcorner"                     => BraceType::BottomCorner,
            "."                                         => BraceType::None,
            _                                           => return None,
        };
        Some(brace)
    }

    /// Width in line widths, before widening for tall braces
    fn width_in_lines(self) -> f64 {
        match self {
            BraceType::Paren                                       => 6.0,
            BraceType::Curly                                       => 6.5,
            BraceType::Square | BraceType::Floor | BraceType::Ceil => 7.0,
            BraceType::Single                                      => 3.0,
            BraceType::Double                                      => 2.0 + 3.0,
            BraceType::None                                        => 0.0,
            BraceType::Angle | BraceType::TopCorner | BraceType::BottomCorner => 5.0,
        }
    }

    fn html(self, opening: bool) -> &'static str {
        match (self, opening) {
            (BraceType::Paren, true)         => "(",
            (BraceType::Paren, false)        => ")",
            (BraceType::Square, true)        => "[",
            (BraceType::Square, false)       => "]",
            (BraceType::Curly, true)         => "{",
            (BraceType::Curly, false)        => "}",
            (BraceType::Angle, true)         => "&lang;",
            (BraceType::Angle, false)        => "&rang;",
            (BraceType::Floor, true)         => "&lfloor;",
            (BraceType::Floor, false)        => "&rfloor;",
            (BraceType::Ceil, true)          => "&lceil;",
            (BraceType::Ceil, false)         => "&rceil;",
            (BraceType::Single, _)           => "|",
            (BraceType::Double, _)           => "&#8214;",
            (BraceType::TopCorner, true)     => "&#8988;",
            (BraceType::TopCorner, false)    => "&#8989;",
            (BraceType::BottomCorner, true)  => "&#8990;",
            (BraceType::BottomCorner, false) => "&#8991;",
            (BraceType::None, _)             => "",
        }
    }
}

/// A child between two delimiters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BraceNode {
    open:       BraceType,
    close:      BraceType,
    child:      Box<Node>,
    /// minimum height in font heights (`\big` and friends)
    min_height: f64,
}

struct BraceLayout {
    size:        NodeSize,
    open_width:  f64,
    close_width: f64,
}

impl BraceNode {
    /// Creates the node
    pub fn new(open: BraceType, close: BraceType, child: Node) -> Self {
        Self { open, close, child: Box::new(child), min_height: 0.0 }
    }

    /// Same node, at least `height` font heights tall
    pub fn with_min_height(self, height: f64) -> Self {
        Self { min_height: height, ..self }
    }

    /// The opening delimiter
    pub fn open(&self) -> BraceType {
        self.open
    }

    /// The closing delimiter
    pub fn close(&self) -> BraceType {
        self.close
    }

    /// The content
    pub fn child(&self) -> &Node {
        &self.child
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> BraceLayout {
        let cs = self.child.compute_size(env, ctx, None);
        let lw = ctx.line_width(env);
        let brace_factor = ctx.settings.brace_factor;
        let font_height = ctx.ascent(env) + ctx.descent(env);
        let min_height = ctx.tight_rect(env, "l").height;
        let so = ctx.strikeout_pos(env);
        let forced = self.min_height * font_height / 2.0;

        let above = (min_height - so).max(cs.baseline_height - so).max(forced);
        let below = so.max(cs.descent() + so).max(forced);
        let half = above.max(below) * brace_factor;
        let overall_height = 2.0 * half;

        let over = overall_height / font_height;
        let widen = if over > BRACE_OVERSIZE_FACTOR { over.sqrt() } else { 1.0 };
        let open_width = self.open.width_in_lines() * lw * widen;
        let close_width = self.close.width_in_lines() * lw * widen;

        BraceLayout {
            size: NodeSize {
                width: open_width + cs.width + close_width,
                baseline_height: so + half,
                overall_height,
                strikeout_pos: so,
                ..NodeSize::default()
            },
            open_width,
            close_width,
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        let size = layout.size;
        let lw = ctx.line_width(env);
        let frame = BraceFrame { y_top: y - size.baseline_height, y_bottom: y - size.baseline_height + size.overall_height, lw };
        frame.draw(canvas, self.open, x, layout.open_width, true, env);
        let x_child = self.child.draw(canvas, x + layout.open_width, y, env, ctx, None);
        frame.draw(canvas, self.close, x_child, layout.close_width, false, env);
        x + size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        html.push_str(self.open.html(true));
        let ok = self.child.to_html(html, env, default, fonts);
        html.push_str(self.close.html(false));
        ok
    }
}

/// Vertical extent shared by both delimiters of a node
struct BraceFrame {
    y_top:    f64,
    y_bottom: f64,
    lw:       f64,
}

impl BraceFrame {
    fn draw(&self, canvas: &mut dyn Canvas, brace: BraceType, x: f64, width: f64, opening: bool, env: &Environment) {
        if brace == BraceType::None || width <= 0.0 {
            return;
        }
        let lw = self.lw;
        let (y1, y2) = (self.y_bottom, self.y_top);
        let height = y1 - y2;
        let xc = x + width / 2.0;
        // the side of the bulge and the side of the tips
        let (outer, inner, dir) = if opening {
            (x + 2.0 * lw, x + (PAREN_FRACTION * width).min(width - lw), 1.0)
        } else {
            (x + width - 2.0 * lw, x + width - (PAREN_FRACTION * width).min(width - lw), -1.0)
        };

        let mut paint = ScopedPaint::new(canvas);
        paint.set_pen(Pen::new(env.color, lw));
        paint.set_brush(Brush::NoBrush);
        let mut path = Path::new();
        match brace {
            BraceType::Paren => {
                let dh = height / 6.0;
                let tip = dir * PAREN_TOP_WIDTH * lw;
                let center = dir * PAREN_CENTER_WIDTH * lw;
                path.move_to(inner, y2)
                    .cubic_to(outer, y2 + dh, outer, y1 - dh, inner, y1)
                    .line_to(inner + tip, y1)
                    .cubic_to(outer + center, y1 - dh, outer + center, y2 + dh, inner + tip, y2)
                    .close();
                paint.set_pen(Pen::none());
                paint.set_brush(Brush::Solid(env.color));
            },
            BraceType::Angle => {
                let yc = (y1 + y2) / 2.0;
                path.move_to(inner, y2)
                    .line_to(outer, yc)
                    .line_to(inner, y1)
                    .line_to(outer + dir * ANGLE_CENTER_WIDTH * lw, yc)
                    .close();
                paint.set_pen(Pen::none());
                paint.set_brush(Brush::Solid(env.color));
            },
            BraceType::Square => {
                path.move_to(inner, y2).line_to(outer, y2).line_to(outer, y1).line_to(inner, y1);
            },
            BraceType::Floor => {
                path.move_to(outer, y2).line_to(outer, y1).line_to(inner, y1);
            },
            BraceType::Ceil => {
                path.move_to(inner, y2).line_to(outer, y2).line_to(outer, y1);
            },
            BraceType::TopCorner => {
                let arm = (inner - outer).abs();
                path.move_to(inner, y2).line_to(outer, y2).line_to(outer, y2 + arm);
            },
            BraceType::BottomCorner => {
                let arm = (inner - outer).abs();
                path.move_to(outer, y1 - arm).line_to(outer, y1).line_to(inner, y1);
            },
            BraceType::Curly => {
                paint.set_pen(Pen::none());
                paint.set_brush(Brush::Solid(env.color));
                paint.translate(xc, y2 + height / 2.0);
                paint.rotate(if opening { 90.0 } else { 270.0 });
                paint.draw_path(&shapes::hbrace_path(0.0, 0.0, height, PAREN_FRACTION * width, lw));
                return;
            },
            BraceType::Single => {
                paint.set_pen(Pen::new(env.color, lw * ABSNORM_LINE_FACTOR));
                paint.draw_line(xc, y2, xc, y1);
                return;
            },
            BraceType::Double => {
                paint.set_pen(Pen::new(env.color, lw * ABSNORM_LINE_FACTOR));
                paint.draw_line(xc - lw, y2, xc - lw, y1);
                paint.draw_line(xc + lw, y2, xc + lw, y1);
                return;
            },
            BraceType::None => return,
        }
        paint.draw_path(&path);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};
    use crate::node::{FracMode, FracNode};

    const ALL: [BraceType; 11] = [
        BraceType::Paren, BraceType::Square, BraceType::Curly, BraceType::Angle, BraceType::Floor, BraceType::Ceil,
        BraceType::Single, BraceType::Double, BraceType::TopCorner, BraceType::BottomCorner, BraceType::None,
    ];

    #[test]
    fn delimiter_names() {
        let tests = [
            ("(", Some(BraceType::Paren)),
            ("]", Some(BraceType::Square)),
            ("\\{", Some(BraceType::Curly)),
            ("rangle", Some(BraceType::Angle)),
            ("Vert", Some(BraceType::Double)),
            ("|", Some(BraceType::Single)),
            (".", Some(BraceType::None)),
            ("llcorner", Some(BraceType::BottomCorner)),
            ("x", None),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(BraceType::from_delimiter(input), expected);
        }
    }

    #[test]
    fn encloses_the_child() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let child = Node::Frac(FracNode::new(FracMode::Frac, text("1"), text("gy")));
        let cs = child.compute_size(&env, &ctx, None);
        let size = BraceNode::new(BraceType::Paren, BraceType::Paren, child).size(&env, &ctx);
        assert!(size.baseline_height >= cs.baseline_height);
        assert!(size.descent() >= cs.descent());
        assert!(size.width > cs.width);
        // centered on the strike-out line
        assert!(close(size.baseline_height - size.strikeout_pos, size.overall_height / 2.0));

        let empty = BraceNode::new(BraceType::None, BraceType::None, text("x")).size(&env, &ctx);
        assert!(close(empty.width, text("x").compute_size(&env, &ctx, None).width));
    }

    #[test]
    fn big_family() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let heights: Vec<f64> = [0.0, 0.85, 1.15, 1.45, 1.75].iter()
            .map(|&h| BraceNode::new(BraceType::Paren, BraceType::None, Node::Noop).with_min_height(h).size(&env, &ctx).overall_height)
            .collect();
        eprintln!("heights: {:?}", heights);
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
        assert!(heights[4] > heights[1]);
    }

    #[test]
    fn tall_braces_are_wider() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let small = BraceNode::new(BraceType::Square, BraceType::None, Node::Noop).size(&env, &ctx);
        let tall = BraceNode::new(BraceType::Square, BraceType::None, Node::Noop).with_min_height(4.0).size(&env, &ctx);
        assert!(tall.width > small.width);
    }

    #[test]
    fn draws_within_box() {
        let child = Node::Frac(FracNode::new(FracMode::Frac, text("a"), text("b")));
        for brace in ALL {
            eprintln!("Input: {:?}", brace);
            let node = Node::Brace(BraceNode::new(brace, brace, child.clone()));
            assert_draws_within_box(&node, &math_env(), 1e-6);
        }
    }

    #[test]
    fn html() {
        let env = Environment::default();
        let mut html = String::new();
        assert!(BraceNode::new(BraceType::Angle, BraceType::Single, Node::Noop).to_html(&mut html, &env, &env, &fonts()));
        assert_eq!(html, "&lang;|");
    }
}
