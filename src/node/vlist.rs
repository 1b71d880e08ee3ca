//! Lines stacked above each other: text broken with `\\`, `center`/`flushleft`/`flushright` and `\substack`.
//!
//! The baseline of the whole stack is the baseline of its first line. A style switch (`\bf` on its own) at the
//! top level of a line carries over to the following lines.

use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::Canvas;

use super::Node;

/// Horizontal alignment of the lines of a [`VerticalListNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineAlign {
    /// flush left (`flushleft`, `\lsubstack`)
    Left,
    /// centered (`center`, `\substack`)
    Center,
    /// flush right (`flushright`, `\rsubstack`)
    Right,
}

impl LineAlign {
    /// The alignment named by the optional argument of `\substack`: `l`, `c` or `r`
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim() {
            "l" => Some(LineAlign::Left),
            "c" => Some(LineAlign::Center),
            "r" => Some(LineAlign::Right),
            _   => None,
        }
    }

    fn html_name(self) -> &'static str {
        match self {
            LineAlign::Left   => "left",
            LineAlign::Center => "center",
            LineAlign::Right  => "right",
        }
    }
}

/// Distance between the baselines of consecutive lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSpacing {
    /// at least the line spacing of the font, more when the lines are tall
    Default,
    /// the lines touch, separated only by a line width (`\substack`)
    Minimal,
}

/// Lines of nodes, one above the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalListNode {
    lines:   Vec<Node>,
    align:   LineAlign,
    spacing: LineSpacing,
}

struct VerticalLayout {
    size:  NodeSize,
    /// horizontal offset, baseline offset from the first baseline, and environment of every line
    lines: Vec<(f64, f64, Environment)>,
}

/// Applies the style switches at the top level of `line` to `env`
fn carry_switches(line: &Node, env: &mut Environment) {
    let direct: Vec<&Node> = match *line {
        Node::List(ref children) => children.iter().collect(),
        ref node => vec![node],
    };
    for node in direct {
        if let Node::ModifyEnvironment(ref m) = *node {
            if m.child().is_none() {
                m.apply(env);
            }
        }
    }
}

impl VerticalListNode {
    /// Creates the stack of `lines`
    pub fn new(lines: Vec<Node>, align: LineAlign, spacing: LineSpacing) -> Self {
        Self { lines, align, spacing }
    }

    /// The lines, top to bottom
    pub fn lines(&self) -> &[Node] {
        &self.lines
    }

    /// Horizontal alignment of the lines
    pub fn align(&self) -> LineAlign {
        self.align
    }

    /// Distance between the lines
    pub fn spacing(&self) -> LineSpacing {
        self.spacing
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> VerticalLayout {
        let mut env = env.clone();
        let mut sizes = Vec::with_capacity(self.lines.len());
        let mut y = 0.0;
        let mut prev_descent: Option<f64> = None;
        let mut width: f64 = 0.0;
        for line in &self.lines {
            let size = line.compute_size(&env, ctx, None);
            if let Some(descent) = prev_descent {
                let leading = ctx.line_width(&env);
                let touching = descent + leading + size.baseline_height;
                y += match self.spacing {
                    LineSpacing::Minimal => touching,
                    LineSpacing::Default => touching.max(ctx.ascent(&env) + ctx.descent(&env)),
                };
            }
            width = width.max(size.width);
            prev_descent = Some(size.descent());
            sizes.push((size, y, env.clone()));
            carry_switches(line, &mut env);
        }

        let (first, last) = match (sizes.first(), sizes.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return VerticalLayout {
                size: NodeSize { strikeout_pos: ctx.strikeout_pos(&env), ..NodeSize::default() },
                lines: Vec::new(),
            },
        };
        let baseline_height = first.baseline_height;
        let overall_height = baseline_height + y + last.descent();
        let lines = sizes.into_iter().map(|(size, y, env)| {
            let dx = match self.align {
                LineAlign::Left   => 0.0,
                LineAlign::Center => (width - size.width) / 2.0,
                LineAlign::Right  => width - size.width,
            };
            (dx, y, env)
        }).collect();

        VerticalLayout {
            size: NodeSize {
                width,
                baseline_height,
                overall_height,
                strikeout_pos: first.strikeout_pos,
                ..NodeSize::default()
            },
            lines,
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        for (line, (dx, dy, env)) in self.lines.iter().zip(&layout.lines) {
            line.draw(canvas, x + dx, y + dy, env, ctx, None);
        }
        x + layout.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        let mut env = env.clone();
        let mut ok = true;
        html.push_str("<div align=\"");
        html.push_str(self.align.html_name());
        html.push_str("\">");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                html.push_str("<br/>");
            }
            ok &= line.to_html(html, &env, default, fonts);
            carry_switches(line, &mut env);
        }
        html.push_str("</div>");
        ok
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};
    use crate::node::{EnvChange, ModifyNode};

    #[test]
    fn first_line_is_the_baseline() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = Environment::default();
        let a = text("Ag").compute_size(&env, &ctx, None);
        let b = text("xxxx").compute_size(&env, &ctx, None);

        let node = VerticalListNode::new(vec![text("Ag"), text("xxxx")], LineAlign::Left, LineSpacing::Minimal);
        let size = node.size(&env, &ctx);
        assert!(close(size.width, a.width.max(b.width)));
        assert!(close(size.baseline_height, a.baseline_height));
        assert!(close(size.strikeout_pos, a.strikeout_pos));
        let gap = ctx.line_width(&env);
        assert!(close(size.overall_height, a.overall_height + gap + b.overall_height));

        // default spacing never puts lines closer than the font spacing
        let spaced = VerticalListNode::new(vec![text("x"), text("x")], LineAlign::Left, LineSpacing::Default).size(&env, &ctx);
        let x = text("x").compute_size(&env, &ctx, None);
        assert!(spaced.overall_height >= x.baseline_height + ctx.ascent(&env) + ctx.descent(&env) - 1e-9);
    }

    #[test]
    fn alignment() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = Environment::default();
        let wide = text("xxxx").compute_size(&env, &ctx, None).width;
        let narrow = text("x").compute_size(&env, &ctx, None).width;
        let tests = [
            (LineAlign::Left, 0.0),
            (LineAlign::Center, (wide - narrow) / 2.0),
            (LineAlign::Right, wide - narrow),
        ];
        for (align, expected) in tests {
            eprintln!("Input: {:?}", align);
            let node = VerticalListNode::new(vec![text("xxxx"), text("x")], align, LineSpacing::Default);
            let layout = node.layout(&env, &ctx);
            assert!(close(layout.lines[1].0, expected));
            assert_eq!(layout.lines[0].0, 0.0);
        }
    }

    #[test]
    fn switches_carry_over() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = Environment::default();
        let large = Node::ModifyEnvironment(ModifyNode::new("large", vec![EnvChange::FontSize(20.0)], None));
        let node = VerticalListNode::new(
            vec![Node::List(vec![text("a"), large]), text("b")],
            LineAlign::Left,
            LineSpacing::Default,
        );
        let layout = node.layout(&env, &ctx);
        assert_eq!(layout.lines[0].2.font_size, 10.0);
        assert_eq!(layout.lines[1].2.font_size, 20.0);
    }

    #[test]
    fn draws_within_box() {
        let nodes = [
            VerticalListNode::new(vec![text("Ag"), text("xx"), text("y")], LineAlign::Center, LineSpacing::Default),
            VerticalListNode::new(vec![text("a"), Node::Noop], LineAlign::Right, LineSpacing::Minimal),
            VerticalListNode::new(vec![], LineAlign::Left, LineSpacing::Default),
        ];
        for node in nodes {
            eprintln!("Input: {:?}", node);
            assert_draws_within_box(&Node::VerticalList(node), &math_env(), 1e-9);
        }
    }

    #[test]
    fn html() {
        let env = Environment::default();
        let mut html = String::new();
        let node = VerticalListNode::new(vec![text("a"), text("b")], LineAlign::Center, LineSpacing::Default);
        assert!(node.to_html(&mut html, &env, &env, &fonts()));
        assert_eq!(
            html,
            "<div align=\"center\"><span style=\"font-size: 10pt;\">a</span><br/>\
             <span style=\"font-size: 10pt;\">b</span></div>",
        );
    }
}
