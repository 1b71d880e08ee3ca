//! Drawing nodes onto a [`Canvas`], such as a PNG image, a recording for tests, etc.
//!
//! The [`Canvas`] trait represents all graphical operations that are needed to render a formula:
//!
//!   - managing paint state: [`Canvas::save`], [`Canvas::restore`], [`Canvas::set_pen`], [`Canvas::set_brush`]
//!   - moving the coordinate system: [`Canvas::translate`], [`Canvas::rotate`]
//!   - drawing text in a given font: [`Canvas::draw_text`]
//!   - drawing lines, rectangles, ellipses and paths made of cubic Bézier curves.
//!
//! Nodes never leave paint state behind: every change is made through a [`ScopedPaint`] guard, which
//! restores the canvas when it goes out of scope.
//!
//! Canvases provided by the crate:
//!
//!  - [`bbox::BBoxCanvas`]: draws nothing and records the area drawn to
//!  - [`tinyskia::TinySkiaCanvas`] (feature `tinyskia-renderer`): renders into a `tiny_skia::Pixmap`
//!
//! ## Caveat on coordinate systems
//!
//! The top is oriented along -Y. So in particular, the Y coordinate of the position of a superscript is less than the Y coordinate of its base.

pub mod bbox;
pub mod shapes;
#[cfg(feature="tinyskia-renderer")]
pub mod tinyskia;

use std::ops::{Deref, DerefMut};

use crate::css::Rgba;
use crate::font::FontRequest;
use crate::geometry::BBox;


/// How lines are stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenStyle {
    /// continuous line
    Solid,
    /// dashes of about three line widths
    Dashed,
    /// dots one line width long
    Dotted,
    /// lines are not drawn
    NoPen,
}

/// Stroke parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// stroke color
    pub color: Rgba,
    /// stroke width
    pub width: f64,
    /// stroke style
    pub style: PenStyle,
}

impl Pen {
    /// Solid pen
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width, style: PenStyle::Solid }
    }

    /// Pen which draws nothing
    pub fn none() -> Self {
        Self { color: Rgba::TRANSPARENT, width: 0.0, style: PenStyle::NoPen }
    }

    /// Same pen with another style
    pub fn with_style(self, style: PenStyle) -> Self {
        Self { style, ..self }
    }

    /// Same pen with another width
    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Rgba::BLACK, 1.0)
    }
}

/// Fill parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    /// shapes are not filled
    NoBrush,
    /// shapes are filled with a color
    Solid(Rgba),
}

impl Default for Brush {
    fn default() -> Self {
        Brush::NoBrush
    }
}

/// One element of a [`Path`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// starts a new sub-path
    MoveTo(f64, f64),
    /// straight segment to the point
    LineTo(f64, f64),
    /// cubic Bézier segment: two control points, then the end point
    CubicTo(f64, f64, f64, f64, f64, f64),
    /// closes the current sub-path
    Close,
}

/// An outline made of straight and cubic segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new sub-path at `(x, y)`
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    /// Straight segment to `(x, y)`
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    /// Cubic segment to `(x, y)`
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::CubicTo(x1, y1, x2, y2, x, y));
        self
    }

    /// Closes the current sub-path
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// The segments of the path
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether the path has no segment
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Box containing every point and control point of the path
    pub fn control_box(&self) -> Option<BBox> {
        let mut bbox: Option<BBox> = None;
        let mut add = |x: f64, y: f64| {
            bbox = Some(match bbox {
                Some(b) => b.enclose(x, y),
                None => BBox::single_point(x, y),
            });
        };
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => add(x, y),
                PathCommand::CubicTo(x1, y1, x2, y2, x, y) => {
                    add(x1, y1);
                    add(x2, y2);
                    add(x, y);
                },
                PathCommand::Close => (),
            }
        }
        bbox
    }
}


/// A surface formulas can be drawn on.
///
/// Shapes are stroked with the current [`Pen`] and filled with the current [`Brush`]; text uses the color of the pen.
/// Implementations keep a stack of paint states (pen, brush, transform) manipulated by [`Canvas::save`] and
/// [`Canvas::restore`]. A `restore` without matching `save` must return silently and not panic.
pub trait Canvas {
    /// Pushes the paint state
    fn save(&mut self);
    /// Pops the paint state
    fn restore(&mut self);
    /// Sets the pen
    fn set_pen(&mut self, pen: Pen);
    /// Sets the brush
    fn set_brush(&mut self, brush: Brush);
    /// Moves the origin to `(dx, dy)`
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotates the coordinate system around the origin by `degrees` (clockwise on screen)
    fn rotate(&mut self, degrees: f64);
    /// Draws `text` with its baseline starting at `(x, y)`
    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontRequest);
    /// Draws a straight line
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// Strokes and fills a rectangle whose top-left corner is at `(x, y)`
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Fills a rectangle with the color of the brush, without stroking it
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Strokes and fills an ellipse with center `(cx, cy)` and radii `rx`, `ry`
    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64);
    /// Strokes and fills a path
    fn draw_path(&mut self, path: &Path);
}


/// Saves the state of a canvas on creation and restores it when dropped.
///
/// The guard dereferences to the canvas, so drawing continues through it:
///
/// ```
/// # use mathtext::render::{bbox::BBoxCanvas, Canvas, Pen, ScopedPaint};
/// # use mathtext::font::FixedMetrics;
/// # let metrics = FixedMetrics::new();
/// let mut canvas = BBoxCanvas::new(&metrics);
/// {
///     let mut scoped = ScopedPaint::new(&mut canvas);
///     scoped.translate(10.0, 0.0);
///     scoped.draw_line(0.0, 0.0, 1.0, 0.0);
/// }
/// canvas.draw_line(0.0, 0.0, 1.0, 0.0);
/// assert_eq!(canvas.depth(), 0);
/// assert_eq!(canvas.finish().map(|b| b.width()), Some(11.0));
/// ```
pub struct ScopedPaint<'c> {
    canvas: &'c mut dyn Canvas,
}

impl<'c> ScopedPaint<'c> {
    /// Saves the state of `canvas`
    pub fn new(canvas: &'c mut dyn Canvas) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<'c> Deref for ScopedPaint<'c> {
    type Target = dyn Canvas + 'c;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'c> DerefMut for ScopedPaint<'c> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl<'c> Drop for ScopedPaint<'c> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
