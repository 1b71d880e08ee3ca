//! Named symbols (`\alpha`, `\leq`, `\int`, `\sin` ...) and the characters the parser splits off math text.

use crate::environment::{resolve_symbol, Environment};
use crate::font::{FontRequest, Rect};
use crate::layout::constants::BAR_WIDTH_FACTOR;
use crate::layout::{MathContext, NodeSize};
use crate::render::{Brush, Canvas, Pen, ScopedPaint};
use crate::symbols::{lookup, GlobalSymbolFlags, SymbolFlags};

/// A symbol of the symbol table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolNode {
    name:   String,
    limits: bool,
}

enum Glyph {
    Text {
        text:     String,
        font:     FontRequest,
        dx:       f64,
        dy:       f64,
        draw_bar: Option<(f64, f64)>,
    },
    /// frame of a missing glyph, relative to the baseline origin
    Placeholder(Rect),
}

struct SymbolLayout {
    glyph: Glyph,
    size:  NodeSize,
}

impl SymbolNode {
    /// Creates the symbol `name` (without backslash). Sub- and superscripts go beside it until
    /// [`SymbolNode::set_limits`] says otherwise.
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), limits: false }
    }

    /// Name of the symbol
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether following sub- and superscripts are placed below and above the symbol
    pub fn limits(&self) -> bool {
        self.limits
    }

    /// See [`SymbolNode::limits`]
    pub fn set_limits(&mut self, limits: bool) {
        self.limits = limits;
    }

    fn placeholder(env: &Environment, ctx: &MathContext) -> SymbolLayout {
        let frame = ctx.tight_rect(env, "X");
        SymbolLayout {
            glyph: Glyph::Placeholder(frame),
            size: NodeSize {
                width: ctx.loose_rect(env, "X").width,
                baseline_height: frame.ascent(),
                overall_height: frame.height,
                strikeout_pos: ctx.strikeout_pos(env),
                ..NodeSize::default()
            },
        }
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> SymbolLayout {
        let full = match lookup(&self.name) {
            Some(full) => full,
            None => {
                warn!("unknown symbol '{}' drawn as a placeholder", self.name);
                return Self::placeholder(env, ctx);
            },
        };
        let resolved = resolve_symbol(full, env, ctx.fonts, ctx.metrics);
        if !resolved.available || resolved.props.symbol.is_empty() {
            warn!("no glyph for symbol '{}', drawing a placeholder", self.name);
            return Self::placeholder(&resolved.env, ctx);
        }

        let text = resolved.props.symbol.clone();
        let font = resolved.font;
        let global = full.global_flags;
        let settings = ctx.settings;
        let tight = ctx.metrics.tight_bounding_rect(&font, &text);
        let loose = ctx.metrics.bounding_rect(&font, &text);

        let (width, dx) = if env.inside_math {
            let mut width = tight.width.max(ctx.metrics.tight_bounding_rect(&font, "(").width);
            if global.contains(GlobalSymbolFlags::EXTEND_WIDTH_IN_MATHMODE) {
                width *= settings.mathoperator_width_factor;
            } else if global.contains(GlobalSymbolFlags::SMALL_EXTEND_WIDTH_IN_MATHMODE) {
                width *= 1.0 + (settings.mathoperator_width_factor - 1.0) / 2.0;
            }
            (width, (width - tight.width) / 2.0 - tight.x)
        } else {
            (loose.width, 0.0)
        };

        let dy = resolved.props.y_shift * tight.height;
        let baseline_height = tight.ascent() - dy;
        let overall_height = if global.contains(GlobalSymbolFlags::HEIGHT_IS_ASCENT) {
            baseline_height
        } else {
            tight.height
        };

        let (sub_super_x_correction, sub_besides_x_correction) =
            if global.contains(GlobalSymbolFlags::INT_LIKE_SYMBOL_CORRECTION) {
                (settings.int_subsuper_xcorrection_factor * tight.width,
                 settings.int_subbesides_xcorrection_xfactor * ctx.tight_rect(env, "X").width)
            } else {
                let italic = match text.chars().last() {
                    Some(c) if font.italic => (-ctx.metrics.right_bearing(&font, c)).max(0.0),
                    _ => 0.0,
                };
                (0.0, italic)
            };

        // the bar of \hbar crosses the upper half of the stem
        let draw_bar = if resolved.props.flags.contains(SymbolFlags::DRAW_BAR) {
            let x_height = ctx.metrics.x_height(&font);
            let y_bar = dy - (x_height + tight.ascent()) / 2.0;
            Some((y_bar, BAR_WIDTH_FACTOR * ctx.metrics.bounding_rect(&font, "x").width))
        } else {
            None
        };

        SymbolLayout {
            glyph: Glyph::Text { text, font, dx, dy, draw_bar },
            size: NodeSize {
                width,
                baseline_height,
                overall_height,
                strikeout_pos: ctx.strikeout_pos(env),
                sub_super_x_correction,
                sub_besides_x_correction,
            },
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        let lw = ctx.line_width(env);
        let mut paint = ScopedPaint::new(canvas);
        paint.set_pen(Pen::new(env.color, lw));
        match layout.glyph {
            Glyph::Text { ref text, ref font, dx, dy, draw_bar } => {
                paint.draw_text(x + dx, y + dy, text, font);
                if let Some((y_bar, bar_width)) = draw_bar {
                    let xs = x + dx + ctx.metrics.tight_bounding_rect(font, text).x;
                    paint.draw_line(xs, y + y_bar, xs + bar_width, y + y_bar);
                }
            },
            Glyph::Placeholder(frame) => {
                paint.set_brush(Brush::NoBrush);
                paint.draw_rect(x + frame.x, y + frame.y, frame.width, frame.height);
            },
        }
        x + layout.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String) -> bool {
        match lookup(&self.name) {
            Some(full) => {
                html.push_str(&full.html);
                true
            },
            None => false,
        }
    }
}
