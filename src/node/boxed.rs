//! Frames and shaded backgrounds: `\fbox`, `\ovalbox`, `\colorbox{..}{..}`, `\fcolorbox{..}{..}{..}` ...
//!
//! The child is surrounded by a padding of half the width of "x", then by the frame. A frame of width `lw`
//! is stroked on a rectangle `lw/2` inside the box, so that the ink stays within the box.

use std::fmt::Write;

use crate::css::{color_to_string, Rgba};
use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::shapes::rounded_rect_path;
use crate::render::{Brush, Canvas, Pen, PenStyle, ScopedPaint};

use super::Node;

/// Padding between child and frame, in widths of "x"
const BOX_PADDING_FACTOR: f64 = 0.5;
/// The inner frame of a double frame is drawn thinner
const DOUBLE_INNER_WIDTH_FACTOR: f64 = 0.6;

/// Colors an instruction reads from its arguments before the child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxColorArgs {
    /// `\fbox{..}`
    None,
    /// `\colorbox{frame}{..}`
    Frame,
    /// `\shaded{background}{..}`
    Background,
    /// `\fcolorbox{frame}{background}{..}`
    FrameAndBackground,
}

/// How a [`BoxNode`] is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStyle {
    /// stroke of the frame, `None` for no frame
    pub frame:       Option<PenStyle>,
    /// width of the frame, in line widths of the font
    pub frame_width: f64,
    /// a second, thinner frame inside the first
    pub double:      bool,
    /// radius of the corners, in widths of "x"
    pub rounding:    f64,
    /// padding around the child, in widths of "x"
    pub padding:     f64,
    /// color of the frame, the text color if `None`
    pub frame_color: Option<Rgba>,
    /// fill color of the box
    pub background:  Option<Rgba>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            frame:       Some(PenStyle::Solid),
            frame_width: 1.0,
            double:      false,
            rounding:    0.0,
            padding:     BOX_PADDING_FACTOR,
            frame_color: None,
            background:  None,
        }
    }
}

impl BoxStyle {
    /// Style of the box instruction `name`, and the colors it reads from its arguments
    pub fn from_instruction(name: &str) -> Option<(Self, BoxColorArgs)> {
        let framed = BoxStyle::default();
        let shaded = BoxStyle { frame: None, ..framed };
        let style = match name {
            "fbox" | "framebox" | "boxed" | "framed" => (framed, BoxColorArgs::None),
            "doublebox"                 => (BoxStyle { double: true, ..framed }, BoxColorArgs::None),
            "ovalbox"                   => (BoxStyle { rounding: 0.7, ..framed }, BoxColorArgs::None),
            "Ovalbox"                   => (BoxStyle { rounding: 0.8, frame_width: 1.5, ..framed }, BoxColorArgs::None),
            "ovaldoublebox"             => (BoxStyle { rounding: 0.7, double: true, ..framed }, BoxColorArgs::None),
            "dashbox" | "dashedbox" | "dbox" => (BoxStyle { frame: Some(PenStyle::Dashed), ..framed }, BoxColorArgs::None),
            "dottedbox" | "dotbox"      => (BoxStyle { frame: Some(PenStyle::Dotted), ..framed }, BoxColorArgs::None),
            "snugbox"                   => (BoxStyle { padding: 0.0, ..framed }, BoxColorArgs::None),
            "colorbox"                  => (framed, BoxColorArgs::Frame),
            "shaded"                    => (shaded, BoxColorArgs::Background),
            "snugshade"                 => (BoxStyle { padding: 0.0, ..shaded }, BoxColorArgs::Background),
            "fcolorbox"                 => (framed, BoxColorArgs::FrameAndBackground),
            _                           => return None,
        };
        Some(style)
    }

    /// Same style with a frame color
    pub fn with_frame_color(self, color: Rgba) -> Self {
        Self { frame_color: Some(color), ..self }
    }

    /// Same style with a background
    pub fn with_background(self, color: Rgba) -> Self {
        Self { background: Some(color), ..self }
    }
}

/// A child drawn inside a frame or on a colored background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxNode {
    instruction: String,
    style:       BoxStyle,
    child:       Box<Node>,
}

struct BoxLayout {
    size:       NodeSize,
    padding:    f64,
    line_width: f64,
    radius:     f64,
    child:      NodeSize,
}

impl BoxNode {
    /// Creates the box drawn by `instruction` around `child`
    pub fn new(instruction: &str, style: BoxStyle, child: Node) -> Self {
        Self { instruction: instruction.to_string(), style, child: Box::new(child) }
    }

    /// Name of the instruction or environment the box was parsed from
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Frame, padding and colors
    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    /// The boxed content
    pub fn child(&self) -> &Node {
        &self.child
    }

    fn layout(&self, env: &Environment, ctx: &MathContext) -> BoxLayout {
        let cs = self.child.compute_size(env, ctx, None);
        let mut upright = env.clone();
        upright.italic = false;
        let x_width = ctx.tight_rect(&upright, "x").width;
        let padding = self.style.padding * x_width;
        let line_width = match self.style.frame {
            Some(_) => ctx.line_width(env) * self.style.frame_width,
            None => 0.0,
        };
        let margin = padding + line_width / 2.0;
        BoxLayout {
            size: NodeSize {
                width:           cs.width + 2.0 * margin,
                baseline_height: cs.baseline_height + margin,
                overall_height:  cs.overall_height + 2.0 * margin,
                strikeout_pos:   cs.strikeout_pos,
                ..NodeSize::default()
            },
            padding,
            line_width,
            radius: self.style.rounding * x_width,
            child: cs,
        }
    }

    pub(crate) fn size(&self, env: &Environment, ctx: &MathContext) -> NodeSize {
        self.layout(env, ctx).size
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let l = self.layout(env, ctx);
        let lw = l.line_width;
        let (rx, ry) = (x + lw / 2.0, y - l.size.baseline_height + lw / 2.0);
        let (rw, rh) = (l.size.width - lw, l.size.overall_height - lw);
        {
            let mut paint = ScopedPaint::new(canvas);
            let color = self.style.frame_color.unwrap_or(env.color);
            let pen = match self.style.frame {
                Some(style) => Pen::new(color, lw).with_style(style),
                None => Pen::none(),
            };
            paint.set_pen(pen);
            paint.set_brush(self.style.background.map_or(Brush::NoBrush, Brush::Solid));
            frame(&mut *paint, rx, ry, rw, rh, l.radius);
            let inset = 2.0 * lw;
            if self.style.double && self.style.frame.is_some() && rw > 2.0 * inset && rh > 2.0 * inset {
                paint.set_brush(Brush::NoBrush);
                paint.set_pen(pen.with_width(lw * DOUBLE_INNER_WIDTH_FACTOR));
                frame(&mut *paint, rx + inset, ry + inset, rw - 2.0 * inset, rh - 2.0 * inset, (l.radius - inset).max(0.0));
            }
        }
        let x_child = x + l.padding + lw / 2.0;
        self.child.draw(canvas, x_child, y, env, ctx, None);
        trace!("\\{} around a child of width {}", self.instruction, l.child.width);
        x + l.size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        let mut style = String::new();
        let _ = write!(style, "padding: {}em; ", self.style.padding / 2.0);
        if let Some(pen) = self.style.frame {
            let line = match pen {
                _ if self.style.double => "double",
                PenStyle::Dashed       => "dashed",
                PenStyle::Dotted       => "dotted",
                _                      => "solid",
            };
            let color = self.style.frame_color.unwrap_or(env.color);
            let _ = write!(style, "border: {}px {} {}; ", self.style.frame_width, line, color_to_string(color));
        }
        if self.style.rounding > 0.0 {
            let _ = write!(style, "border-radius: {}em; ", self.style.rounding / 2.0);
        }
        if let Some(background) = self.style.background {
            let _ = write!(style, "background-color: {}; ", color_to_string(background));
        }
        let _ = write!(html, "<span style=\"{}\">", style.trim_end());
        let ok = self.child.to_html(html, env, default, fonts);
        html.push_str("</span>");
        ok
    }
}

fn frame(canvas: &mut dyn Canvas, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    if radius > 0.0 {
        canvas.draw_path(&rounded_rect_path(x, y, width, height, radius));
    } else {
        canvas.draw_rect(x, y, width, height);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::layout::LayoutSettings;
    use crate::node::tests::{assert_draws_within_box, close, fonts, math_env, text};

    #[test]
    fn instructions() {
        let tests = [
            ("fbox", Some(BoxColorArgs::None)),
            ("ovalbox", Some(BoxColorArgs::None)),
            ("colorbox", Some(BoxColorArgs::Frame)),
            ("shaded", Some(BoxColorArgs::Background)),
            ("fcolorbox", Some(BoxColorArgs::FrameAndBackground)),
            ("frac", None),
        ];
        for (name, expected) in tests {
            eprintln!("Input: {:?}", name);
            assert_eq!(BoxStyle::from_instruction(name).map(|(_, args)| args), expected);
        }
        let (snug, _) = BoxStyle::from_instruction("snugshade").unwrap();
        assert_eq!(snug.frame, None);
        assert_eq!(snug.padding, 0.0);
        let (dotted, _) = BoxStyle::from_instruction("dotbox").unwrap();
        assert_eq!(dotted.frame, Some(PenStyle::Dotted));
    }

    #[test]
    fn padding_and_frame() {
        let settings = LayoutSettings::default();
        let fonts = fonts();
        let metrics = FixedMetrics::new();
        let ctx = MathContext::new(&settings, &fonts, &metrics);
        let env = Environment::default();
        let child = text("ab");
        let cs = child.compute_size(&env, &ctx, None);
        let x_width = ctx.tight_rect(&env, "x").width;
        let lw = ctx.line_width(&env);

        let (style, _) = BoxStyle::from_instruction("fbox").unwrap();
        let size = BoxNode::new("fbox", style, child.clone()).size(&env, &ctx);
        let margin = 0.5 * x_width + lw / 2.0;
        assert!(close(size.width, cs.width + 2.0 * margin));
        assert!(close(size.baseline_height, cs.baseline_height + margin));
        assert!(close(size.descent(), cs.descent() + margin));

        // no frame, no padding: the box is the child
        let (style, _) = BoxStyle::from_instruction("snugshade").unwrap();
        let size = BoxNode::new("snugshade", style, child).size(&env, &ctx);
        assert!(close(size.width, cs.width));
        assert!(close(size.overall_height, cs.overall_height));
    }

    #[test]
    fn draws_within_box() {
        let names = [
            "fbox", "doublebox", "ovalbox", "Ovalbox", "ovaldoublebox", "dashbox", "dottedbox", "snugbox",
            "colorbox", "shaded", "snugshade", "fcolorbox",
        ];
        for name in names {
            for child in [text("Ag"), Node::Noop] {
                eprintln!("Input: {:?} {:?}", name, child);
                let (style, _) = BoxStyle::from_instruction(name).unwrap();
                let style = style.with_background(Rgba::new(200, 200, 200, 255));
                assert_draws_within_box(&Node::Boxed(BoxNode::new(name, style, child)), &math_env(), 1e-9);
            }
        }
    }

    #[test]
    fn html() {
        let env = Environment::default();
        let mut html = String::new();
        let (style, _) = BoxStyle::from_instruction("fcolorbox").unwrap();
        let style = style.with_frame_color(Rgba::new(255, 0, 0, 255)).with_background(Rgba::new(0, 0, 255, 255));
        let node = BoxNode::new("fcolorbox", style, text("a"));
        assert!(node.to_html(&mut html, &env, &env, &fonts()));
        assert_eq!(
            html,
            "<span style=\"padding: 0.25em; border: 1px solid red; background-color: blue;\">\
             <span style=\"font-size: 10pt;\">a</span></span>",
        );
    }
}
