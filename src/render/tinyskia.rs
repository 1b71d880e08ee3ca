//! Provides a [`Canvas`] for tiny-skia
//!
//! This allows to render onto a canvas of RGBA pixels ([`Pixmap`]),
//! which can then be used inside a [`tiny_skia`] application,
//! or convert to a PNG image.
//!
//! Text is drawn as glyph outlines when the canvas is given fonts with [`TinySkiaCanvas::with_fonts`]
//! (feature `ttfparser-fontparser`), and as placeholder boxes otherwise.

use std::marker::PhantomData;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use super::{Brush, Canvas, Path, PathCommand, Pen, PenStyle};
use crate::css::Rgba;
use crate::font::FontRequest;
use crate::layout::NodeSize;
#[cfg(feature="ttfparser-fontparser")]
use crate::font::backend::ttf_parser::TtfFontMetrics;

#[derive(Debug, Clone, Copy)]
struct State {
    pen:       Pen,
    brush:     Brush,
    transform: Transform,
}

/// Canvas drawing onto a tiny-skia [`Pixmap`]
pub struct TinySkiaCanvas<'f> {
    /// A canvas to draw onto
    pixmap: Pixmap,
    /// From canvas units to pixels
    scale:  f32,
    state:  State,
    saved:  Vec<State>,
    #[cfg(feature="ttfparser-fontparser")]
    fonts:  Option<&'f TtfFontMetrics<'f>>,
    _fonts: PhantomData<&'f ()>,
}

impl<'f> TinySkiaCanvas<'f> {
    /// New canvas of `width` x `height` canvas units, each unit being `scale` pixels.
    /// Returns `None` if one of the dimensions in pixels is zero.
    pub fn new(width: f64, height: f64, scale: f64) -> Option<Self> {
        let pixmap = Pixmap::new((width * scale).ceil() as u32, (height * scale).ceil() as u32)?;
        Some(Self {
            pixmap,
            scale: scale as f32,
            state: State { pen: Pen::default(), brush: Brush::NoBrush, transform: Transform::identity() },
            saved: Vec::new(),
            #[cfg(feature="ttfparser-fontparser")]
            fonts: None,
            _fonts: PhantomData,
        })
    }

    /// New canvas fitting a formula of the given size. Draw the formula at `(0, size.baseline_height)`.
    pub fn for_size(size: &NodeSize, scale: f64) -> Option<Self> {
        Self::new(size.width, size.overall_height, scale)
    }

    /// Draws text with the outlines of the faces of `fonts`
    #[cfg(feature="ttfparser-fontparser")]
    pub fn with_fonts(mut self, fonts: &'f TtfFontMetrics<'f>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Fills the whole pixmap with `color`
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(to_color(color));
    }

    /// Returns pixmap being drawn onto after all drawing operations are completed
    pub fn pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// From the current coordinates to pixels
    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale).pre_concat(self.state.transform)
    }

    fn fill_with(&mut self, path: &tiny_skia::Path, color: Rgba) {
        let mut paint = Paint::default();
        paint.set_color(to_color(color));
        paint.anti_alias = true;
        let transform = self.transform();
        self.pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
    }

    fn fill_path(&mut self, path: &tiny_skia::Path) {
        if let Brush::Solid(color) = self.state.brush {
            self.fill_with(path, color);
        }
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path) {
        let pen = self.state.pen;
        if pen.style == PenStyle::NoPen || pen.width <= 0.0 {
            return;
        }
        let width = pen.width as f32;
        let mut stroke = Stroke { width, ..Stroke::default() };
        match pen.style {
            PenStyle::Dashed => stroke.dash = StrokeDash::new(vec![3.0 * width, 2.0 * width], 0.0),
            PenStyle::Dotted => stroke.dash = StrokeDash::new(vec![width, 2.0 * width], 0.0),
            _ => (),
        }
        let mut paint = Paint::default();
        paint.set_color(to_color(pen.color));
        paint.anti_alias = true;
        let transform = self.transform();
        self.pixmap.stroke_path(path, &paint, &stroke, transform, None);
    }

    /// Outlines of `text` in one of the registered faces. Returns `false` if no face serves `font`.
    #[cfg(feature="ttfparser-fontparser")]
    fn draw_glyphs(&mut self, x: f64, y: f64, text: &str, font: &FontRequest) -> bool {
        struct Builder {
            open_path: PathBuilder,
        }

        impl ttf_parser::OutlineBuilder for Builder {
            fn move_to(&mut self, x: f32, y: f32) {
                self.open_path.move_to(x, y);
            }
            fn line_to(&mut self, x: f32, y: f32) {
                self.open_path.line_to(x, y);
            }
            fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
                self.open_path.quad_to(x1, y1, x, y);
            }
            fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
                self.open_path.cubic_to(x1, y1, x2, y2, x, y);
            }
            fn close(&mut self) {
                self.open_path.close();
            }
        }

        let (face, scale) = match self.fonts.and_then(|fonts| fonts.face_for(font)) {
            Some(face) => face,
            None => return false,
        };
        let mut paint = Paint::default();
        paint.set_color(to_color(self.state.pen.color));
        paint.anti_alias = true;

        let mut advance = 0.0;
        for c in text.chars() {
            let gid = match face.glyph_index(c) {
                Some(gid) => gid,
                None => continue,
            };
            // font units grow upwards, canvas units downwards
            let transform = self.transform()
                .pre_translate((x + advance) as f32, y as f32)
                .pre_scale(scale as f32, -scale as f32);
            let mut builder = Builder { open_path: PathBuilder::new() };
            face.outline_glyph(gid, &mut builder);
            if let Some(path) = builder.open_path.finish() {
                self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
            advance += face.glyph_hor_advance(gid).map_or(0.0, f64::from) * scale;
        }
        true
    }

    #[cfg(not(feature="ttfparser-fontparser"))]
    fn draw_glyphs(&mut self, _x: f64, _y: f64, _text: &str, _font: &FontRequest) -> bool {
        false
    }

    /// One outlined box per character
    fn draw_placeholders(&mut self, x: f64, y: f64, text: &str, font: &FontRequest) {
        debug!("drawing {:?} as placeholder boxes", text);
        let width = 0.5 * font.size;
        let height = 0.7 * font.size;
        let pen = Pen::new(self.state.pen.color, (0.05 * font.size).max(0.5));
        let saved = self.state.pen;
        self.state.pen = pen;
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let rect = Rect::from_xywh((x + i as f64 * width) as f32, (y - height) as f32, (0.8 * width) as f32, height as f32);
            if let Some(path) = rect.map(PathBuilder::from_rect) {
                self.stroke_path(&path);
            }
        }
        self.state.pen = saved;
    }
}

fn to_color(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(x, y) => builder.move_to(x as f32, y as f32),
            PathCommand::LineTo(x, y) => builder.line_to(x as f32, y as f32),
            PathCommand::CubicTo(x1, y1, x2, y2, x, y) =>
                builder.cubic_to(x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

impl<'f> Canvas for TinySkiaCanvas<'f> {
    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state.pen = pen;
    }

    fn set_brush(&mut self, brush: Brush) {
        self.state.brush = brush;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.pre_translate(dx as f32, dy as f32);
    }

    fn rotate(&mut self, degrees: f64) {
        self.state.transform = self.state.transform.pre_rotate(degrees as f32);
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontRequest) {
        if !self.draw_glyphs(x, y, text, font) {
            self.draw_placeholders(x, y, text, font);
        }
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let mut builder = PathBuilder::new();
        builder.move_to(x1 as f32, y1 as f32);
        builder.line_to(x2 as f32, y2 as f32);
        if let Some(path) = builder.finish() {
            self.stroke_path(&path);
        }
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            let path = PathBuilder::from_rect(rect);
            self.fill_path(&path);
            self.stroke_path(&path);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            let path = PathBuilder::from_rect(rect);
            self.fill_path(&path);
        }
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        let oval = Rect::from_xywh((cx - rx) as f32, (cy - ry) as f32, (2.0 * rx) as f32, (2.0 * ry) as f32);
        if let Some(path) = oval.and_then(PathBuilder::from_oval) {
            self.fill_path(&path);
            self.stroke_path(&path);
        }
    }

    fn draw_path(&mut self, path: &Path) {
        if let Some(path) = to_skia_path(path) {
            self.fill_path(&path);
            self.stroke_path(&path);
        }
    }
}
