//! Accents and lines drawn around a child: `\hat{x}`, `\vec{v}`, `\overline{ab}`, `\cancel{y}` ...
//!
//! Decorations above the child sit in a band of height `decoration_height_factor` times the height of the
//! child, separated from it by `decoration_separation_factor` times that height. Decorations below the child
//! and the crossing lines of `\cancel` reach below its descent. The node grows so that the band is part of it.

use crate::environment::Environment;
use crate::layout::{MathContext, NodeSize};
use crate::render::{shapes, Brush, Canvas, Path, Pen, ScopedPaint};

use super::Node;

/// Decoration of a [`DecoratedNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    /// `\vec`: small arrow above
    Vec,
    /// `\hat`: caret of fixed width
    Hat,
    /// `\widehat`: caret across the whole child
    WideHat,
    /// `\check`: inverted caret of fixed width
    Check,
    /// `\widecheck`: inverted caret across the whole child
    WideCheck,
    /// `\breve`
    Breve,
    /// `\ocirc`: small ring above
    Ocirc,
    /// `\dot`
    Dot,
    /// `\ddot`: two dots
    DDot,
    /// `\bar`: short bar above
    Bar,
    /// `\arrow`, `\overrightarrow`: arrow across the whole child
    Arrow,
    /// `\overline`
    Overline,
    /// `\ooline`: two lines above
    DoubleOverline,
    /// `\underline`
    Underline,
    /// `\uuline`: two lines below
    DoubleUnderline,
    /// `\tilde`: tilde of fixed width
    Tilde,
    /// `\widetilde`: tilde across the whole child
    WideTilde,
    /// `\cancel`: stroke from bottom left to top right
    Cancel,
    /// `\bcancel`: stroke from top left to bottom right
    BCancel,
    /// `\xcancel`: both strokes
    XCancel,
    /// `\sout`: line through the strikeout position
    Strike,
}

impl DecorationKind {
    /// The decoration of the instruction `name` (without backslash)
    pub fn from_instruction(name: &str) -> Option<Self> {
        let kind = match name {
            "vec"                                => DecorationKind::Vec,
            "hat"                                => DecorationKind::Hat,
            "widehat"                            => DecorationKind::WideHat,
            "check"                              => DecorationKind::Check,
            "widecheck"                          => DecorationKind::WideCheck,
            "breve"                              => DecorationKind::Breve,
            "ocirc"                              => DecorationKind::Ocirc,
            "dot"                                => DecorationKind::Dot,
            "ddot"                               => DecorationKind::DDot,
            "bar"                                => DecorationKind::Bar,
            "arrow" | "overrightarrow"           => DecorationKind::Arrow,
            "overline" | "oline" | "ol"          => DecorationKind::Overline,
            "ooline" | "ool" | "doubleoverline"  => DecorationKind::DoubleOverline,
            "underline" | "uline" | "ul"         => DecorationKind::Underline,
            "uuline" | "uul" | "doubleunderline" => DecorationKind::DoubleUnderline,
            "tilde"                              => DecorationKind::Tilde,
            "widetilde"                          => DecorationKind::WideTilde,
            "cancel"                             => DecorationKind::Cancel,
            "bcancel"                            => DecorationKind::BCancel,
            "xcancel"                            => DecorationKind::XCancel,
            "sout" | "st"                        => DecorationKind::Strike,
            _                                    => return None,
        };
        Some(kind)
    }

    fn is_above(self) -> bool {
        !matches!(self, DecorationKind::Underline | DecorationKind::DoubleUnderline | DecorationKind::Strike
            | DecorationKind::Cancel | DecorationKind::BCancel | DecorationKind::XCancel)
    }

    fn is_below(self) -> bool {
        matches!(self, DecorationKind::Underline | DecorationKind::DoubleUnderline)
    }

    fn is_cancel(self) -> bool {
        matches!(self, DecorationKind::Cancel | DecorationKind::BCancel | DecorationKind::XCancel)
    }
}

/// A child with a decoration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecoratedNode {
    kind:  DecorationKind,
    child: Box<Node>,
}

/// Geometry shared by size and draw, relative to the start of the node and its baseline
struct DecoLayout {
    size:         NodeSize,
    child_x:      f64,
    child_width:  f64,
    /// shift of the top decorations to the right, for italic children
    italic_corr:  f64,
    /// bottom and height of the band above the child (as heights above the baseline)
    band_bottom:  f64,
    band_height:  f64,
    /// depth of lines below the child
    below:        f64,
    /// width of the shortened wide decorations
    deco_width:   f64,
    /// width of the narrow accents
    mini_width:   f64,
    vec_width:    f64,
    dot_radius:   f64,
    line_width:   f64,
}

impl DecoratedNode {
    /// Creates the node
    pub fn new(kind: DecorationKind, child: Node) -> Self {
        Self { kind, child: Box::new(child) }
    }

    /// The decoration
    pub fn kind(&self) -> DecorationKind {
        self.kind
    }

    /// The decorated node
    pub fn child(&self) -> &Node {
        &self.child
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> DecoLayout {
        let settings = ctx.settings;
        let kind = self.kind;
        let cs = self.child.compute_size(env, ctx, None);
        let lw = ctx.line_width(env);
        let italic_corr = if env.italic {
            let upright = Environment { italic: false, ..env.clone() };
            (cs.width - self.child.compute_size(&upright, ctx, None).width).max(0.0)
        } else {
            0.0
        };

        let dot_radius = ctx.loose_rect(env, ".").width / 2.0;
        let mut mini_width = match kind {
            DecorationKind::Tilde | DecorationKind::Breve => ctx.loose_rect(env, "~").width,
            _                                             => ctx.loose_rect(env, "^").width,
        } - italic_corr;
        if kind == DecorationKind::DDot {
            mini_width = mini_width.max(3.0 * dot_radius);
        }
        let mini_width = mini_width.max(0.0);
        let width = cs.width.max(mini_width);

        let top_base = if kind == DecorationKind::Bar { cs.baseline_height.max(ctx.ascent(env)) } else { cs.baseline_height };
        let band_bottom = top_base * (1.0 + settings.decoration_separation_factor);
        let band_height = (settings.decoration_height_factor * top_base).max(2.0 * lw).max(2.0 * dot_radius);
        let mut below = (cs.descent() * (1.0 + settings.decoration_height_factor))
            .max(ctx.x_height(env) * settings.decoration_height_factor);
        if kind == DecorationKind::DoubleUnderline {
            below += 2.0 * lw;
        }

        let x_offset = settings.decoration_width_reduction_xfactor * ctx.loose_rect(env, "X").width / 2.0;
        let width_x = ctx.loose_rect(env, "x").width;
        let deco_width = (width_x * 0.5).max(cs.width - 2.0 * x_offset - italic_corr).min(width);

        let mut baseline_height = cs.baseline_height;
        if kind.is_above() {
            baseline_height = baseline_height.max(band_bottom + band_height + lw / 2.0);
        } else if kind.is_cancel() {
            baseline_height = baseline_height.max(band_bottom);
        } else if kind == DecorationKind::Strike {
            // an empty child still gets its line at the strike-out position
            baseline_height = baseline_height.max(cs.strikeout_pos + lw / 2.0);
        }
        let mut descent = cs.descent();
        if kind.is_below() {
            descent = descent.max(below + lw / 2.0);
        } else if kind.is_cancel() {
            descent = descent.max(below);
        }

        DecoLayout {
            size: NodeSize {
                width,
                baseline_height,
                overall_height: baseline_height + descent,
                strikeout_pos: cs.strikeout_pos,
                sub_super_x_correction: cs.sub_super_x_correction,
                sub_besides_x_correction: cs.sub_besides_x_correction,
            },
            child_x: (width - cs.width) / 2.0,
            child_width: cs.width,
            italic_corr,
            band_bottom,
            band_height,
            below,
            deco_width,
            mini_width,
            vec_width: width_x * 0.33,
            dot_radius,
            line_width: lw,
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let l = self.layout(env, ctx);
        let cx = x + l.child_x;
        self.child.draw(canvas, cx, y, env, ctx, None);

        let lw = l.line_width;
        let x_end = x + l.size.width;
        // horizontal center of the decorations above, and the extent of a decoration of `width` around it
        let center = cx + l.italic_corr + (l.child_width - l.italic_corr) / 2.0;
        let span = |width: f64| {
            let c = center.max(x + width / 2.0).min(x_end - width / 2.0);
            (c - width / 2.0, c, c + width / 2.0)
        };
        let (x0, xc, x1) = span(l.deco_width);
        let (m0, mc, m1) = span(l.mini_width);
        let bottom = y - l.band_bottom;
        let top = bottom - l.band_height;
        let y_below = y + l.below;
        // lines below the child and crossing lines cover the child without its italic overhang
        let (u0, u1) = (cx, cx + (l.child_width - l.italic_corr).max(0.0));

        let mut paint = ScopedPaint::new(canvas);
        paint.set_pen(Pen::new(env.color, lw));
        paint.set_brush(Brush::NoBrush);
        let mut path = Path::new();
        match self.kind {
            DecorationKind::Vec => {
                path.move_to(x0, bottom).line_to(x1, bottom).line_to(x1 - l.vec_width, bottom - l.band_height * 2.0 / 3.0);
            },
            DecorationKind::Overline | DecorationKind::Bar => {
                paint.draw_line(x0, bottom, x1, bottom);
            },
            DecorationKind::DoubleOverline => {
                paint.draw_line(x0, bottom, x1, bottom);
                paint.draw_line(x0, bottom - 2.0 * lw, x1, bottom - 2.0 * lw);
            },
            DecorationKind::Underline => {
                paint.draw_line(u0, y_below, u1, y_below);
            },
            DecorationKind::DoubleUnderline => {
                paint.draw_line(u0, y_below - 2.0 * lw, u1, y_below - 2.0 * lw);
                paint.draw_line(u0, y_below, u1, y_below);
            },
            DecorationKind::Arrow => {
                let head = l.band_height.min(2.0 * l.vec_width);
                path = shapes::arrow_path(x0, bottom - l.band_height / 2.0, x1 - x0, head, false, true);
            },
            DecorationKind::Hat => {
                path.move_to(m0, bottom).line_to(mc, top).line_to(m1, bottom);
            },
            DecorationKind::WideHat => {
                path.move_to(x0, bottom).line_to(xc, top).line_to(x1, bottom);
            },
            DecorationKind::Check => {
                path.move_to(m0, top).line_to(mc, bottom).line_to(m1, top);
            },
            DecorationKind::WideCheck => {
                path.move_to(x0, top).line_to(xc, bottom).line_to(x1, top);
            },
            DecorationKind::Breve => {
                path.move_to(m0, top).cubic_to(m0, bottom, m1, bottom, m1, top);
            },
            DecorationKind::Tilde => {
                let mid = (top + bottom) / 2.0;
                path.move_to(m0, mid).cubic_to(mc, bottom, mc, top, m1, mid);
            },
            DecorationKind::WideTilde => {
                let mid = (top + bottom) / 2.0;
                path.move_to(x0, mid).cubic_to(xc, bottom, xc, top, x1, mid);
            },
            DecorationKind::Ocirc => {
                let r = l.dot_radius / 1.5;
                paint.draw_ellipse(mc, bottom - r, r, r);
            },
            DecorationKind::Dot | DecorationKind::DDot => {
                let r = l.dot_radius / 2.0;
                paint.set_pen(Pen::none());
                paint.set_brush(Brush::Solid(env.color));
                if self.kind == DecorationKind::Dot {
                    paint.draw_ellipse(mc, bottom - r, r, r);
                } else {
                    paint.draw_ellipse(mc - l.dot_radius, bottom - r, r, r);
                    paint.draw_ellipse(mc + l.dot_radius, bottom - r, r, r);
                }
            },
            DecorationKind::Strike => {
                let ys = y - l.size.strikeout_pos;
                paint.draw_line(u0, ys, u1, ys);
            },
            DecorationKind::Cancel => {
                paint.draw_line(u0, y_below, u1, bottom);
            },
            DecorationKind::BCancel => {
                paint.draw_line(u0, bottom, u1, y_below);
            },
            DecorationKind::XCancel => {
                paint.draw_line(u0, y_below, u1, bottom);
                paint.draw_line(u0, bottom, u1, y_below);
            },
        }
        if !path.is_empty() {
            paint.draw_path(&path);
        }
        x_end
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};

    const ALL: [DecorationKind; 21] = [
        DecorationKind::Vec, DecorationKind::Hat, DecorationKind::WideHat, DecorationKind::Check,
        DecorationKind::WideCheck, DecorationKind::Breve, DecorationKind::Ocirc, DecorationKind::Dot,
        DecorationKind::DDot, DecorationKind::Bar, DecorationKind::Arrow, DecorationKind::Overline,
        DecorationKind::DoubleOverline, DecorationKind::Underline, DecorationKind::DoubleUnderline,
        DecorationKind::Tilde, DecorationKind::WideTilde, DecorationKind::Cancel, DecorationKind::BCancel,
        DecorationKind::XCancel, DecorationKind::Strike,
    ];

    #[test]
    fn instructions() {
        let tests = [
            ("vec", Some(DecorationKind::Vec)),
            ("ol", Some(DecorationKind::Overline)),
            ("uuline", Some(DecorationKind::DoubleUnderline)),
            ("xcancel", Some(DecorationKind::XCancel)),
            ("frac", None),
        ];
        for (input, expected) in tests {
            eprintln!("Input: {:?}", input);
            assert_eq!(DecorationKind::from_instruction(input), expected);
        }
    }

    #[test]
    fn extents() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let child = text("ab");
        let cs = child.compute_size(&env, &ctx, None);
        for kind in ALL {
            eprintln!("Input: {:?}", kind);
            let size = DecoratedNode::new(kind, child.clone()).size(&env, &ctx);
            assert!(size.width >= cs.width);
            assert!(size.baseline_height >= cs.baseline_height);
            assert!(size.descent() >= cs.descent());
            assert_eq!(size.baseline_height > cs.baseline_height, kind.is_above() || kind.is_cancel());
            assert_eq!(size.descent() > cs.descent(), kind.is_below() || kind.is_cancel());
        }
        // \bar reaches at least the ascent of the font
        let bar = DecoratedNode::new(DecorationKind::Bar, text("a")).size(&env, &ctx);
        assert!(bar.baseline_height > ctx.ascent(&env));
        // the strike-out line stays through the child
        let strike = DecoratedNode::new(DecorationKind::Strike, text("a")).size(&env, &ctx);
        assert!(close(strike.baseline_height, text("a").compute_size(&env, &ctx, None).baseline_height));
    }

    #[test]
    fn narrow_children_are_widened() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let size = DecoratedNode::new(DecorationKind::Hat, Node::Noop).size(&env, &ctx);
        assert!(size.width > 0.0);
    }

    #[test]
    fn draws_within_box() {
        for child in [text("x"), text("abc"), text("gy"), Node::Noop] {
            for kind in ALL {
                eprintln!("Input: {:?} {:?}", kind, child);
                let node = Node::Decorated(DecoratedNode::new(kind, child.clone()));
                assert_draws_within_box(&node, &math_env(), 1e-6);
            }
        }
    }
}
