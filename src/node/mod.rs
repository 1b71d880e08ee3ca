//! The node tree a formula is parsed into, and how each node is measured and drawn.
//!
//! [`Node`] is a closed set of variants. Every variant knows how to
//!
//!   - compute its [`NodeSize`] from the sizes of its children ([`Node::compute_size`]),
//!   - draw itself on a [`Canvas`] at a baseline position and return the new x coordinate ([`Node::draw`]),
//!   - export itself as HTML, as far as HTML can express it ([`Node::to_html`]).
//!
//! All three walk the tree with an [`Environment`] passed by value: a node which changes the style of its
//! children hands them a modified copy. Nodes never keep state between calls, so measuring the same tree twice
//! in the same environment gives the same result.

mod boxed;
mod brace;
mod decorated;
mod frac;
mod list;
mod matrix;
mod modify;
mod sqrt;
mod subsup;
mod symbol;
mod text;
mod vlist;
mod whitespace;

pub use self::boxed::{BoxColorArgs, BoxNode, BoxStyle};
pub use self::brace::{BraceNode, BraceType};
pub use self::decorated::{DecoratedNode, DecorationKind};
pub use self::frac::{FracMode, FracNode};
pub use self::matrix::{ColumnAlign, LineType, MatrixLayout, MatrixNode};
pub use self::modify::{EnvChange, ModifyNode};
pub use self::sqrt::SqrtNode;
pub use self::symbol::SymbolNode;
pub use self::text::TextNode;
pub use self::vlist::{LineAlign, LineSpacing, VerticalListNode};
pub use self::whitespace::{WhitespaceKind, WhitespaceNode};

use crate::css::Rgba;
use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::{Brush, Canvas, Pen, PenStyle, ScopedPaint};


/// One element of a formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// a run of text
    Text(TextNode),
    /// a named symbol (`\alpha`, `\int`, `+` in math mode ...)
    Symbol(SymbolNode),
    /// two children above each other (`\frac`, `\underbrace`, `\overset` ...)
    Frac(FracNode),
    /// a root with an optional degree
    Sqrt(SqrtNode),
    /// `_{..}`
    Subscript(Box<Node>),
    /// `^{..}`
    Superscript(Box<Node>),
    /// cells of `matrix`, `array`, `tabular` ...
    Matrix(MatrixNode),
    /// a child between two delimiters (`\left( .. \right)`)
    Brace(BraceNode),
    /// a child with an accent or a line (`\hat`, `\overline`, `\cancel` ...)
    Decorated(DecoratedNode),
    /// children placed next to each other
    List(Vec<Node>),
    /// lines placed above each other (`\\`, `center`, `\substack` ...)
    VerticalList(VerticalListNode),
    /// a child in a frame or on a background (`\fbox`, `\colorbox` ...)
    Boxed(BoxNode),
    /// a change of the environment (`\bf`, `\textcolor{red}{..}`, `\mathrm{..}` ...)
    ModifyEnvironment(ModifyNode),
    /// horizontal space (`\quad`, `\,`, `~` ...)
    Whitespace(WhitespaceNode),
    /// draws nothing; stands in for constructs that could not be parsed
    Noop,
}

impl Node {
    /// Size of the node drawn in `env`.
    ///
    /// `prev` is the size of the preceding sibling when it is tall (for superscripts) or deep (for subscripts),
    /// which moves the script away from the baseline. Other nodes ignore it.
    pub fn compute_size(&self, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> NodeSize {
        let fresh = match *self {
            Node::Text(ref text)              => text.size(env, ctx),
            Node::Symbol(ref symbol)          => symbol.size(env, ctx),
            Node::Frac(ref frac)              => frac.size(env, ctx),
            Node::Sqrt(ref sqrt)              => sqrt.size(env, ctx),
            Node::Subscript(ref child)        => subsup::subscript_size(child, env, ctx, prev),
            Node::Superscript(ref child)      => subsup::superscript_size(child, env, ctx, prev),
            Node::Matrix(ref matrix)          => matrix.layout(env, ctx).size,
            Node::Brace(ref brace)            => brace.size(env, ctx),
            Node::Decorated(ref decorated)    => decorated.size(env, ctx),
            Node::List(ref children)          => list::size(children, env, ctx),
            Node::VerticalList(ref lines)     => lines.size(env, ctx),
            Node::Boxed(ref boxed)            => boxed.size(env, ctx),
            Node::ModifyEnvironment(ref m)    => m.size(env, ctx),
            Node::Whitespace(ref space)       => space.size(env, ctx),
            Node::Noop                        => NodeSize { strikeout_pos: ctx.strikeout_pos(env), ..NodeSize::default() },
        };
        let mut size = NodeSize::default();
        size.update_from(&fresh);
        size
    }

    /// Draws the node with its baseline starting at `(x, y)` and returns the x coordinate where the next node starts.
    pub fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) -> f64 {
        if ctx.draw_boxes {
            self.draw_box(canvas, x, y, env, ctx, prev);
        }
        match *self {
            Node::Text(ref text)              => text.draw(canvas, x, y, env, ctx),
            Node::Symbol(ref symbol)          => symbol.draw(canvas, x, y, env, ctx),
            Node::Frac(ref frac)              => frac.draw(canvas, x, y, env, ctx),
            Node::Sqrt(ref sqrt)              => sqrt.draw(canvas, x, y, env, ctx),
            Node::Subscript(ref child)        => subsup::draw_subscript(child, canvas, x, y, env, ctx, prev),
            Node::Superscript(ref child)      => subsup::draw_superscript(child, canvas, x, y, env, ctx, prev),
            Node::Matrix(ref matrix)          => matrix.draw(canvas, x, y, env, ctx),
            Node::Brace(ref brace)            => brace.draw(canvas, x, y, env, ctx),
            Node::Decorated(ref decorated)    => decorated.draw(canvas, x, y, env, ctx),
            Node::List(ref children)          => list::draw(children, canvas, x, y, env, ctx),
            Node::VerticalList(ref lines)     => lines.draw(canvas, x, y, env, ctx),
            Node::Boxed(ref boxed)            => boxed.draw(canvas, x, y, env, ctx),
            Node::ModifyEnvironment(ref m)    => m.draw(canvas, x, y, env, ctx),
            Node::Whitespace(ref space)       => space.draw(canvas, x, y, env, ctx),
            Node::Noop                        => x,
        }
    }

    /// Appends the HTML for the node to `html`. `default` is the environment the HTML is embedded in.
    /// Returns false if the node cannot be expressed in HTML (the output is then incomplete).
    pub fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        match *self {
            Node::Text(ref text)              => text.to_html(html, env, default, fonts),
            Node::Symbol(ref symbol)          => symbol.to_html(html),
            Node::Frac(ref frac)              => frac.to_html(html, env, default, fonts),
            Node::Sqrt(ref sqrt)              => sqrt.to_html(html, env, default, fonts),
            Node::Subscript(ref child)        => wrap_html(html, "sub", |h| child.to_html(h, env, default, fonts)),
            Node::Superscript(ref child)      => wrap_html(html, "sup", |h| child.to_html(h, env, default, fonts)),
            Node::Matrix(ref matrix)          => matrix.to_html(html, env, default, fonts),
            Node::Brace(ref brace)            => brace.to_html(html, env, default, fonts),
            Node::Decorated(_)                => false,
            Node::List(ref children)          => list::to_html(children, html, env, default, fonts),
            Node::VerticalList(ref lines)     => lines.to_html(html, env, default, fonts),
            Node::Boxed(ref boxed)            => boxed.to_html(html, env, default, fonts),
            Node::ModifyEnvironment(ref m)    => m.to_html(html, env, default, fonts),
            Node::Whitespace(ref space)       => space.to_html(html),
            Node::Noop                        => true,
        }
    }

    /// Whether sub- and superscripts following this node go below and above it
    pub fn has_limits(&self) -> bool {
        match *self {
            Node::Symbol(ref symbol)       => symbol.limits(),
            Node::ModifyEnvironment(ref m) => m.limits(),
            _                              => false,
        }
    }

    /// Sets the placement of following sub- and superscripts (`\limits`, `\nolimits`).
    /// Returns false for nodes which cannot carry limits.
    pub fn set_limits(&mut self, limits: bool) -> bool {
        match *self {
            Node::Symbol(ref mut symbol)       => { symbol.set_limits(limits); true },
            Node::ModifyEnvironment(ref mut m) => { m.set_limits(limits); true },
            _                                  => false,
        }
    }

    /// Whether the node is a [`Node::Noop`], or a list made only of them
    pub fn is_empty(&self) -> bool {
        match *self {
            Node::Noop => true,
            Node::List(ref children) => children.iter().all(Node::is_empty),
            _ => false,
        }
    }

    /// Number of nodes in the tree, including `self`
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(|c| c.count()).sum::<usize>()
    }

    /// Direct children of the node
    pub fn children(&self) -> Vec<&Node> {
        match *self {
            Node::Frac(ref frac)           => vec![frac.numerator(), frac.denominator()],
            Node::Sqrt(ref sqrt)           => sqrt.children(),
            Node::Subscript(ref child) |
            Node::Superscript(ref child)   => vec![child],
            Node::Matrix(ref matrix)       => matrix.cells().iter().flatten().collect(),
            Node::Brace(ref brace)         => vec![brace.child()],
            Node::Decorated(ref decorated) => vec![decorated.child()],
            Node::List(ref children)       => children.iter().collect(),
            Node::VerticalList(ref lines)  => lines.lines().iter().collect(),
            Node::Boxed(ref boxed)         => vec![boxed.child()],
            Node::ModifyEnvironment(ref m) => m.child().into_iter().collect(),
            _                              => Vec::new(),
        }
    }

    fn draw_box(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext, prev: Option<&NodeSize>) {
        let size = self.compute_size(env, ctx, prev);
        let lw = ctx.line_width(env) * 0.5;
        let mut paint = ScopedPaint::new(canvas);
        paint.set_brush(Brush::NoBrush);
        paint.set_pen(Pen::new(Rgba::new(0, 0, 255, 160), lw).with_style(PenStyle::Dashed));
        paint.draw_rect(x, y - size.baseline_height, size.width, size.overall_height);
        paint.set_pen(Pen::new(Rgba::new(255, 0, 0, 160), lw));
        paint.draw_line(x, y, x + size.width, y);
    }
}

fn wrap_html(html: &mut String, tag: &str, inner: impl FnOnce(&mut String) -> bool) -> bool {
    html.push('<');
    html.push_str(tag);
    html.push('>');
    let ok = inner(html);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
    ok
}

/// Grows `size` so that it covers the lines [`draw_style_lines`] draws for `env`.
pub(crate) fn cover_style_lines(size: &mut NodeSize, env: &Environment, ctx: &MathContext) {
    if size.width <= 0.0 || !(env.underlined || env.overline || env.strike) {
        return;
    }
    let half = ctx.line_width(env) / 2.0;
    let mut ascent = size.baseline_height;
    let mut descent = size.descent();
    if env.underlined {
        descent = descent.max(ctx.descent(env) / 2.0 + half);
    }
    if env.overline {
        ascent = ascent.max(ctx.ascent(env) + half);
    }
    if env.strike {
        ascent = ascent.max(ctx.strikeout_pos(env) + half);
    }
    size.baseline_height = ascent;
    size.overall_height = ascent + descent;
}

/// Draws the underline, overline and strike-out lines requested by `env` below, above and through `width`
/// starting at `x`.
pub(crate) fn draw_style_lines(canvas: &mut dyn Canvas, x: f64, y: f64, width: f64, env: &Environment, ctx: &MathContext) {
    if width <= 0.0 || !(env.underlined || env.overline || env.strike) {
        return;
    }
    let lw = ctx.line_width(env);
    let mut paint = ScopedPaint::new(canvas);
    paint.set_pen(Pen::new(env.color, lw));
    if env.underlined {
        let yl = y + ctx.descent(env) / 2.0;
        paint.draw_line(x, yl, x + width, yl);
    }
    if env.overline {
        let yl = y - ctx.ascent(env);
        paint.draw_line(x, yl, x + width, yl);
    }
    if env.strike {
        let yl = y - ctx.strikeout_pos(env);
        paint.draw_line(x, yl, x + width, yl);
    }
}
