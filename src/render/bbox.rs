//! Defines a canvas that does not draw anything but computes the "real bbox", the one that encloses all areas actually drawn to.
//! Characters (typically in italic style) routinely go beyond the box computed by the layout.
//! To determine the real bounding box, you can draw with the canvas defined in this module.

use crate::font::{FontMetrics, FontRequest};
use crate::geometry::{BBox, Transform};

use super::{Brush, Canvas, Path, Pen};


/// A canvas that does not draw but simply records the bounding box being drawn to.
/// Text is measured with the ink box given by a [`FontMetrics`].
pub struct BBoxCanvas<'m> {
    metrics:   &'m dyn FontMetrics,
    /// The current bounding box
    /// Is None when nothing has been drawn yet
    bbox:      Option<BBox>,
    transform: Transform,
    stack:     Vec<Transform>,
}

impl<'m> BBoxCanvas<'m> {
    /// Creates a new bbox canvas measuring text with `metrics`.
    pub fn new(metrics: &'m dyn FontMetrics) -> Self {
        Self {
            metrics,
            bbox: None,
            transform: Transform::identity(),
            stack: Vec::new(),
        }
    }

    /// Number of saved states not yet restored
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the bounding box computed by the canvas.
    /// Return None when nothing has be drawn
    pub fn finish(self) -> Option<BBox> {
        self.bbox
    }

    fn enclose(&mut self, bbox: BBox) {
        let bbox = self.transform.apply_bbox(&bbox);
        self.bbox = Some(match self.bbox {
            Some(other) => bbox.union(other),
            None => bbox,
        });
    }
}

impl<'m> Canvas for BBoxCanvas<'m> {
    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn set_pen(&mut self, _pen: Pen) {}
    fn set_brush(&mut self, _brush: Brush) {}

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.transform = self.transform.pre_rotate(degrees);
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontRequest) {
        let ink = self.metrics.tight_bounding_rect(font, text);
        if ink.width > 0.0 || ink.height > 0.0 {
            self.enclose(BBox::from_dims(x + ink.x, y + ink.y, ink.width, ink.height));
        }
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.enclose(BBox::single_point(x1, y1).enclose(x2, y2));
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.enclose(BBox::from_dims(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.enclose(BBox::from_dims(x, y, width, height));
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.enclose(BBox::from_dims(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry));
    }

    fn draw_path(&mut self, path: &Path) {
        if let Some(bbox) = path.control_box() {
            self.enclose(bbox);
        }
    }
}
