//! Horizontal space: `\quad`, `\,`, `\!`, `~` ...

use crate::environment::Environment;
use crate::layout::{MathContext, NodeSize};
use crate::render::Canvas;

use super::{cover_style_lines, draw_style_lines};

/// Width of a [`WhitespaceNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitespaceKind {
    /// a normal space of the current font
    Space,
    /// `~`, a space that does not break
    Nonbreaking,
    /// `\ `, a third of an em
    ThreePerEm,
    /// `\enspace`, half an em
    En,
    /// `\quad`
    Em,
    /// `\qquad`
    DoubleEm,
    /// `\,` (3/18 em)
    Thin,
    /// `\:` (4/18 em)
    Medium,
    /// `\;` (5/18 em)
    Thick,
    /// `\!`
    NegThin,
    /// `\negmedspace`
    NegMedium,
    /// `\negthickspace`
    NegThick,
}

impl WhitespaceKind {
    /// The kind of space produced by the instruction `name` (without backslash)
    pub fn from_instruction(name: &str) -> Option<Self> {
        let kind = match name {
            "quad" | "emspace"           => WhitespaceKind::Em,
            "qquad"                      => WhitespaceKind::DoubleEm,
            "enspace" | "enskip"         => WhitespaceKind::En,
            "," | "thinspace"            => WhitespaceKind::Thin,
            ":" | ">" | "medspace"       => WhitespaceKind::Medium,
            ";" | "thickspace"           => WhitespaceKind::Thick,
            "!" | "negthinspace"         => WhitespaceKind::NegThin,
            "negmedspace"                => WhitespaceKind::NegMedium,
            "negthickspace"              => WhitespaceKind::NegThick,
            " "                          => WhitespaceKind::ThreePerEm,
            "nbsp"                       => WhitespaceKind::Nonbreaking,
            "space"                      => WhitespaceKind::Space,
            _                            => return None,
        };
        Some(kind)
    }

    /// Width in ems; `None` for the kinds measured on the font's space
    fn ems(self) -> Option<f64> {
        match self {
            WhitespaceKind::Space | WhitespaceKind::Nonbreaking => None,
            WhitespaceKind::ThreePerEm => Some(1.0 / 3.0),
            WhitespaceKind::En         => Some(0.5),
            WhitespaceKind::Em         => Some(1.0),
            WhitespaceKind::DoubleEm   => Some(2.0),
            WhitespaceKind::Thin       => Some(3.0 / 18.0),
            WhitespaceKind::Medium     => Some(4.0 / 18.0),
            WhitespaceKind::Thick      => Some(5.0 / 18.0),
            WhitespaceKind::NegThin    => Some(-3.0 / 18.0),
            WhitespaceKind::NegMedium  => Some(-4.0 / 18.0),
            WhitespaceKind::NegThick   => Some(-5.0 / 18.0),
        }
    }

    fn html(self) -> &'static str {
        match self {
            WhitespaceKind::Space      => " ",
            WhitespaceKind::Nonbreaking => "&nbsp;",
            WhitespaceKind::ThreePerEm => "&#8196;",
            WhitespaceKind::En         => "&ensp;",
            WhitespaceKind::Em         => "&emsp;",
            WhitespaceKind::DoubleEm   => "&emsp;&emsp;",
            WhitespaceKind::Thin       => "&thinsp;",
            WhitespaceKind::Medium     => "&#8287;",
            WhitespaceKind::Thick      => "&#8197;",
            WhitespaceKind::NegThin | WhitespaceKind::NegMedium | WhitespaceKind::NegThick => "",
        }
    }
}

/// `count` times a space of the given kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhitespaceNode {
    kind:  WhitespaceKind,
    count: usize,
}

impl WhitespaceNode {
    /// A single space
    pub fn new(kind: WhitespaceKind) -> Self {
        Self { kind, count: 1 }
    }

    /// Several spaces
    pub fn repeated(kind: WhitespaceKind, count: usize) -> Self {
        Self { kind, count }
    }

    /// Kind of space
    pub fn kind(&self) -> WhitespaceKind {
        self.kind
    }

    /// Number of spaces
    pub fn count(&self) -> usize {
        self.count
    }

    fn width(&self, env: &Environment, ctx: &MathContext) -> f64 {
        // the em is the advance of "M"
        let single = match self.kind.ems() {
            Some(ems) => ems * ctx.loose_rect(env, "M").width,
            None => ctx.loose_rect(env, " ").width,
        };
        single * self.count as f64
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        let mut size = NodeSize {
            width: self.width(env, ctx),
            strikeout_pos: ctx.strikeout_pos(env),
            ..NodeSize::default()
        };
        cover_style_lines(&mut size, env, ctx);
        size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let width = self.width(env, ctx);
        draw_style_lines(canvas, x, y, width, env, ctx);
        x + width
    }

    pub(crate) fn to_html(&self, html: &mut String) -> bool {
        for _ in 0..self.count {
            html.push_str(self.kind.html());
        }
        true
    }
}
