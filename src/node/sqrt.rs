//! Roots: `\sqrt{..}`, `\sqrt[n]{..}`, `\cbrt{..}`.

use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::{Brush, Canvas, Path, Pen, ScopedPaint};

use super::Node;

/// A root sign over a child, with an optional degree in its crook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqrtNode {
    child:  Box<Node>,
    degree: Option<Box<Node>>,
}

struct SqrtLayout {
    size:    NodeSize,
    sign:    Path,
    child_x: f64,
    /// position and environment of the degree
    degree:  Option<(f64, f64, Environment)>,
}

impl SqrtNode {
    /// Creates a root
    pub fn new(child: Node, degree: Option<Node>) -> Self {
        Self { child: Box::new(child), degree: degree.map(Box::new) }
    }

    /// The radicand
    pub fn child(&self) -> &Node {
        &self.child
    }

    /// The degree, if any
    pub fn degree(&self) -> Option<&Node> {
        self.degree.as_deref()
    }

    pub(crate) fn children(&self) -> Vec<&Node> {
        let mut children = vec![&*self.child];
        children.extend(self.degree());
        children
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> SqrtLayout {
        let settings = ctx.settings;
        let cs = self.child.compute_size(env, ctx, None);
        let lw = ctx.line_width(env);
        let sign_width = ctx.loose_rect(env, "X").width * settings.sqrt_width_xfactor;
        let ascent = (cs.baseline_height * settings.sqrt_height_factor).max(ctx.ascent(env));
        let descent = (cs.descent() * settings.sqrt_height_factor).max(ctx.descent(env));
        let height = ascent + descent;
        // the hook of the sign, relative to the baseline
        let y_hook = -ascent + 0.55 * height;

        let mut baseline_height = ascent;
        let mut extra = 0.0;
        let mut degree = None;
        if let Some(ref node) = self.degree {
            let mut denv = env.scaled(settings.sqrt_smallfont_factor);
            denv.italic = false;
            let ds = node.compute_size(&denv, ctx, None);
            extra = (ds.width - 0.45 * sign_width).max(0.0);
            let y_degree = y_hook - 2.0 * lw - ds.descent();
            baseline_height = baseline_height.max(-y_degree + ds.baseline_height);
            degree = Some((extra + 0.45 * sign_width - ds.width, y_degree, denv));
        }

        let x0 = extra;
        let width = extra + sign_width + cs.width;
        let mut sign = Path::new();
        sign.move_to(x0, y_hook)
            .line_to(x0 + 0.25 * sign_width, y_hook - 0.05 * height)
            .line_to(x0 + 0.5 * sign_width, descent)
            .line_to(x0 + sign_width, -ascent)
            .line_to(width, -ascent);

        SqrtLayout {
            size: NodeSize {
                width,
                baseline_height,
                overall_height: baseline_height + descent,
                strikeout_pos: ctx.strikeout_pos(env),
                ..NodeSize::default()
            },
            sign,
            child_x: x0 + sign_width,
            degree,
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        {
            let mut paint = ScopedPaint::new(canvas);
            paint.set_pen(Pen::new(env.color, ctx.line_width(env)));
            paint.set_brush(Brush::NoBrush);
            paint.translate(x, y);
            paint.draw_path(&layout.sign);
        }
        if let (Some(node), Some(&(dx, dy, ref denv))) = (self.degree.as_ref(), layout.degree.as_ref()) {
            node.draw(canvas, x + dx, y + dy, denv, ctx, None);
        }
        self.child.draw(canvas, x + layout.child_x, y, env, ctx, None);
        x + layout.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        let mut ok = true;
        if let Some(ref degree) = self.degree {
            html.push_str("<sup>");
            ok &= degree.to_html(html, env, default, fonts);
            html.push_str("</sup>");
        }
        html.push_str("&radic;<span style=\"text-decoration:overline\">");
        ok &= self.child.to_html(html, env, default, fonts);
        html.push_str("&nbsp;</span>");
        ok
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};

    #[test]
    fn sign_covers_the_child() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let child = Node::Frac(crate::node::FracNode::new(crate::node::FracMode::Frac, text("1"), text("2")));
        let cs = child.compute_size(&env, &ctx, None);
        let size = SqrtNode::new(child, None).size(&env, &ctx);
        assert!(close(size.baseline_height, cs.baseline_height * settings.sqrt_height_factor));
        assert!(close(size.width, cs.width + ctx.loose_rect(&env, "X").width * settings.sqrt_width_xfactor));

        // small children still get a sign of the font's height
        let small = SqrtNode::new(text("x"), None).size(&env, &ctx);
        assert!(close(small.baseline_height, ctx.ascent(&env)));
        assert!(close(small.descent(), ctx.descent(&env)));
    }

    #[test]
    fn wide_degree_widens_the_node() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = math_env();
        let plain = SqrtNode::new(text("x"), None).size(&env, &ctx);
        let cube = SqrtNode::new(text("x"), Some(text("3"))).size(&env, &ctx);
        let wide = SqrtNode::new(text("x"), Some(text("n+100"))).size(&env, &ctx);
        assert!(cube.width >= plain.width);
        assert!(wide.width > cube.width);
        assert!(wide.baseline_height >= plain.baseline_height);
    }

    #[test]
    fn draws_within_box() {
        let tests = [
            SqrtNode::new(text("x"), None),
            SqrtNode::new(text("gy"), Some(text("3"))),
            SqrtNode::new(text("a"), Some(text("n+100"))),
        ];
        for node in tests {
            eprintln!("Input: {:?}", node);
            assert_draws_within_box(&Node::Sqrt(node), &math_env(), 1e-9);
        }
    }

    #[test]
    fn html() {
        let env = Environment::default();
        let mut html = String::new();
        assert!(SqrtNode::new(text("2"), Some(text("3"))).to_html(&mut html, &env, &env, &fonts()));
        assert_eq!(html, "<sup><span style=\"font-size: 10pt;\">3</span></sup>&radic;<span style=\"text-decoration:overline\"><span style=\"font-size: 10pt;\">2</span>&nbsp;</span>");
    }
}
