use serde_derive::{Deserialize, Serialize};

use mathtext::css::Rgba;
use mathtext::font::FontRequest;
use mathtext::render::{Brush, Canvas, Path, PathCommand, Pen};


/// A formula and what drawing it produced
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub tex:         String,
    pub description: String,
    pub width:       f64,
    pub height:      f64,
    pub render:      DebugRender,
}


/// A canvas recording the calls made on it
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugRender {
    pub commands: Vec<DrawCmd>,
    #[serde(skip)]
    depth:        usize,
    #[serde(skip)]
    max_depth:    usize,
}

impl DebugRender {
    /// Saves not matched by a restore
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(|c| match *c {
            DrawCmd::Text { ref text, .. } => Some(text.as_str()),
            _ => None,
        }).collect()
    }

    /// Where text was drawn, in drawing order
    pub fn text_positions(&self) -> Vec<(f64, f64)> {
        self.commands.iter().filter_map(|c| match *c {
            DrawCmd::Text { pos, .. } => Some(pos),
            _ => None,
        }).collect()
    }

    /// Colors text was drawn with, in drawing order
    pub fn text_colors(&self) -> Vec<Rgba> {
        let mut pens = vec![Pen::default()];
        let mut colors = Vec::new();
        for command in &self.commands {
            match *command {
                DrawCmd::Save => pens.push(*pens.last().unwrap()),
                DrawCmd::Restore => { pens.pop(); },
                DrawCmd::SetPen(pen) => *pens.last_mut().unwrap() = pen,
                DrawCmd::Text { .. } => colors.push(pens.last().unwrap().color),
                _ => (),
            }
        }
        colors
    }
}


#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    SetPen(Pen),
    SetBrush(Brush),
    Translate(f64, f64),
    Rotate(f64),
    Text {
        pos:    (f64, f64),
        text:   String,
        family: String,
        size:   f64,
    },
    Line {
        from: (f64, f64),
        to:   (f64, f64),
    },
    Rect {
        pos:    (f64, f64),
        width:  f64,
        height: f64,
        filled: bool,
    },
    Ellipse {
        center: (f64, f64),
        radii:  (f64, f64),
    },
    Path(Vec<PathCommand>),
}

impl Canvas for DebugRender {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCmd::Restore);
    }

    fn set_pen(&mut self, pen: Pen) {
        self.commands.push(DrawCmd::SetPen(pen));
    }

    fn set_brush(&mut self, brush: Brush) {
        self.commands.push(DrawCmd::SetBrush(brush));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCmd::Translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.commands.push(DrawCmd::Rotate(degrees));
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &FontRequest) {
        self.commands.push(DrawCmd::Text {
            pos:    (x, y),
            text:   text.to_string(),
            family: font.family.clone(),
            size:   font.size,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCmd::Line { from: (x1, y1), to: (x2, y2) });
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCmd::Rect { pos: (x, y), width, height, filled: false });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCmd::Rect { pos: (x, y), width, height, filled: true });
    }

    fn draw_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.commands.push(DrawCmd::Ellipse { center: (cx, cy), radii: (rx, ry) });
    }

    fn draw_path(&mut self, path: &Path) {
        self.commands.push(DrawCmd::Path(path.commands().to_vec()));
    }
}
