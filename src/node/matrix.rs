//! Grids of cells: `matrix`, `array{..}`, `tabular{..}`, `cases` ...
//!
//! Every column is as wide as its widest cell, every row as high as its highest ascent plus its deepest
//! descent. The grid is centered vertically on the strike-out line of the surrounding font. Rules are drawn
//! before the first column and after each column (as given by the column spec of `array`), above the first
//! row and below each row (`\hline`, `\hdashline` ...).

use crate::environment::{Environment, FontSettings};
use crate::layout::{MathContext, NodeSize};
use crate::render::{Canvas, Pen, PenStyle, ScopedPaint};

use super::Node;

/// Horizontal alignment of the cells of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnAlign {
    /// `l`
    Left,
    /// `c`
    Center,
    /// `r`
    Right,
}

/// Style of a rule of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    /// no rule
    None,
    /// `|`, `\hline`
    Solid,
    /// `:`, `\hdashline`
    Dashed,
    /// `||`, `\hline\hline`
    Double,
    /// `::`
    DoubleDashed,
    /// `\toprule`, `\bottomrule`: a thicker solid rule
    Heavy,
}

/// Line widths of the rules of one matrix
#[derive(Debug, Clone, Copy)]
struct RuleWidths {
    thin:       f64,
    heavy:      f64,
    /// distance between the two lines of a double rule
    separation: f64,
}

impl LineType {
    /// Space taken across the rule
    fn extent(self, widths: &RuleWidths) -> f64 {
        match self {
            LineType::None                         => 0.0,
            LineType::Solid | LineType::Dashed     => widths.thin,
            LineType::Double | LineType::DoubleDashed => widths.separation + widths.thin,
            LineType::Heavy                        => widths.heavy,
        }
    }
}

/// Sizes of the columns and rows of a [`MatrixNode`], as computed for one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixLayout {
    /// widest cell of every column
    pub col_widths:     Vec<f64>,
    /// largest height above the baseline in every row
    pub row_ascents:    Vec<f64>,
    /// largest depth below the baseline in every row
    pub row_descents:   Vec<f64>,
    /// space between columns
    pub xsep:           f64,
    /// space between rows
    pub ysep:           f64,
    /// space left of the first column, including the outer rule
    pub left_padding:   f64,
    /// space right of the last column, including the outer rule
    pub right_padding:  f64,
    /// space above the first row, including the top rule
    pub top_padding:    f64,
    /// space below the last row, including the bottom rule
    pub bottom_padding: f64,
    /// size of the whole matrix
    pub size:           NodeSize,
}

impl MatrixLayout {
    /// x offset of the start of column `j`
    fn column_x(&self, j: usize) -> f64 {
        self.left_padding + self.col_widths[..j].iter().map(|w| w + self.xsep).sum::<f64>()
    }

    /// y offset of the top of row `i` below the top of the matrix
    fn row_top(&self, i: usize) -> f64 {
        self.top_padding + (0..i).map(|k| self.row_ascents[k] + self.row_descents[k] + self.ysep).sum::<f64>()
    }
}

/// A grid of cells with rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixNode {
    cells:            Vec<Vec<Node>>,
    alignments:       Vec<ColumnAlign>,
    /// one rule before the first column and one after each column
    vertical_lines:   Vec<LineType>,
    top_line:         LineType,
    /// one rule below each row
    row_bottom_lines: Vec<LineType>,
}

impl MatrixNode {
    /// Creates a matrix of centered columns without rules. Short rows are filled up with [`Node::Noop`].
    pub fn new(mut cells: Vec<Vec<Node>>) -> Self {
        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        for row in cells.iter_mut() {
            row.resize(columns, Node::Noop);
        }
        let rows = cells.len();
        Self {
            cells,
            alignments: vec![ColumnAlign::Center; columns],
            vertical_lines: vec![LineType::None; columns + 1],
            top_line: LineType::None,
            row_bottom_lines: vec![LineType::None; rows],
        }
    }

    /// Same matrix with the given alignments and vertical rules. Missing entries are centered and without rule.
    pub fn with_columns(mut self, mut alignments: Vec<ColumnAlign>, mut vertical_lines: Vec<LineType>) -> Self {
        let columns = self.columns();
        alignments.resize(columns, ColumnAlign::Center);
        vertical_lines.resize(columns + 1, LineType::None);
        self.alignments = alignments;
        self.vertical_lines = vertical_lines;
        self
    }

    /// Same matrix with the given horizontal rules
    pub fn with_row_lines(mut self, top_line: LineType, mut row_bottom_lines: Vec<LineType>) -> Self {
        row_bottom_lines.resize(self.rows(), LineType::None);
        self.top_line = top_line;
        self.row_bottom_lines = row_bottom_lines;
        self
    }

    /// The cells, row by row
    pub fn cells(&self) -> &[Vec<Node>] {
        &self.cells
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.alignments.len()
    }

    /// Alignment of every column
    pub fn alignments(&self) -> &[ColumnAlign] {
        &self.alignments
    }

    /// The rule before the first column, then the rule after each column
    pub fn vertical_lines(&self) -> &[LineType] {
        &self.vertical_lines
    }

    /// The rule above the first row
    pub fn top_line(&self) -> LineType {
        self.top_line
    }

    /// The rule below each row
    pub fn row_bottom_lines(&self) -> &[LineType] {
        &self.row_bottom_lines
    }

    fn rule_widths(env: &Environment, ctx: &MathContext) -> RuleWidths {
        let settings = ctx.settings;
        let thin = settings.matrix_linewidth_thin_factor * ctx.line_width(env);
        RuleWidths {
            thin,
            heavy: settings.matrix_linewidth_heavy_factor * thin,
            separation: settings.matrix_line_separation_factor * thin,
        }
    }

    /// Computes the sizes of the rows and columns in `env`
    pub fn layout(&self, env: &Environment, ctx: &MathContext) -> MatrixLayout {
        let settings = ctx.settings;
        let columns = self.columns();
        let mut col_widths = vec![0.0_f64; columns];
        let mut row_ascents = vec![0.0_f64; self.rows()];
        let mut row_descents = vec![0.0_f64; self.rows()];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let cs = cell.compute_size(env, ctx, None);
                col_widths[j] = col_widths[j].max(cs.width);
                row_ascents[i] = row_ascents[i].max(cs.baseline_height);
                row_descents[i] = row_descents[i].max(cs.descent());
            }
        }

        let lw = ctx.line_width(env);
        let width_x = ctx.loose_rect(env, "x").width;
        let xsep = settings.matrix_x_separation_factor * width_x;
        let ysep = settings.matrix_y_separation_factor * width_x;
        let padding = |line: LineType, factor: f64| if line == LineType::None { lw } else { factor * width_x };
        let last_vertical = self.vertical_lines.last().copied().unwrap_or(LineType::None);
        let last_horizontal = self.row_bottom_lines.last().copied().unwrap_or(LineType::None);
        let first_vertical = self.vertical_lines.first().copied().unwrap_or(LineType::None);
        let left_padding = padding(first_vertical, settings.matrix_x_padding_factor);
        let right_padding = padding(last_vertical, settings.matrix_x_padding_factor);
        let top_padding = padding(self.top_line, settings.matrix_y_padding_factor);
        let bottom_padding = padding(last_horizontal, settings.matrix_y_padding_factor);

        let gaps = |n: usize| n.saturating_sub(1) as f64;
        let width = left_padding + col_widths.iter().sum::<f64>() + gaps(columns) * xsep + right_padding;
        let height = top_padding
            + row_ascents.iter().zip(&row_descents).map(|(a, d)| a + d).sum::<f64>()
            + gaps(self.rows()) * ysep
            + bottom_padding;
        let strikeout_pos = ctx.strikeout_pos(env);

        MatrixLayout {
            col_widths,
            row_ascents,
            row_descents,
            xsep,
            ysep,
            left_padding,
            right_padding,
            top_padding,
            bottom_padding,
            size: NodeSize {
                width,
                baseline_height: height / 2.0 + strikeout_pos,
                overall_height: height,
                strikeout_pos,
                ..NodeSize::default()
            },
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, x: f64, y: f64, env: &Environment, ctx: &MathContext) -> f64 {
        let layout = self.layout(env, ctx);
        let size = layout.size;
        let y_top = y - size.baseline_height;

        for (i, row) in self.cells.iter().enumerate() {
            let y_row = y_top + layout.row_top(i) + layout.row_ascents[i];
            for (j, cell) in row.iter().enumerate() {
                let width = cell.compute_size(env, ctx, None).width;
                let dx = match self.alignments[j] {
                    ColumnAlign::Left   => 0.0,
                    ColumnAlign::Center => (layout.col_widths[j] - width) / 2.0,
                    ColumnAlign::Right  => layout.col_widths[j] - width,
                };
                cell.draw(canvas, x + layout.column_x(j) + dx, y_row, env, ctx, None);
            }
        }

        let widths = Self::rule_widths(env, ctx);
        let rules = Rules { widths, pen: Pen::new(env.color, widths.thin) };
        let columns = self.columns();
        let (x_left, x_right) = (x, x + size.width);
        let (y_bottom, rows) = (y_top + size.overall_height, self.rows());
        for (j, &line) in self.vertical_lines.iter().enumerate() {
            let xl = if j == 0 {
                x_left + line.extent(&widths) / 2.0
            } else if j == columns {
                x_right - line.extent(&widths) / 2.0
            } else {
                x + layout.column_x(j) - layout.xsep / 2.0
            };
            rules.draw(canvas, line, true, xl, y_top, y_bottom);
        }
        rules.draw(canvas, self.top_line, false, y_top + self.top_line.extent(&widths) / 2.0, x_left, x_right);
        for (i, &line) in self.row_bottom_lines.iter().enumerate() {
            let yl = if i + 1 == rows {
                y_bottom - line.extent(&widths) / 2.0
            } else {
                y_top + layout.row_top(i + 1) - layout.ysep / 2.0
            };
            rules.draw(canvas, line, false, yl, x_left, x_right);
        }
        x + size.width
    }

    pub(crate) fn to_html(&self, html: &mut String, env: &Environment, default: &Environment, fonts: &FontSettings) -> bool {
        let mut ok = true;
        html.push_str("<table>");
        for row in &self.cells {
            html.push_str("<tr>");
            for (cell, align) in row.iter().zip(&self.alignments) {
                html.push_str(match *align {
                    ColumnAlign::Left   => "<td align=\"left\">",
                    ColumnAlign::Center => "<td align=\"center\">",
                    ColumnAlign::Right  => "<td align=\"right\">",
                });
                ok &= cell.to_html(html, env, default, fonts);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        ok
    }
}

struct Rules {
    widths: RuleWidths,
    pen:    Pen,
}

impl Rules {
    /// Draws a rule centered on `pos` (an x coordinate if `vertical`, a y coordinate otherwise) from `from` to `to`.
    fn draw(&self, canvas: &mut dyn Canvas, line: LineType, vertical: bool, pos: f64, from: f64, to: f64) {
        let (pen, offsets): (Pen, &[f64]) = match line {
            LineType::None         => return,
            LineType::Solid        => (self.pen, &[0.0][..]),
            LineType::Dashed       => (self.pen.with_style(PenStyle::Dashed), &[0.0][..]),
            LineType::Double       => (self.pen, &[-0.5, 0.5][..]),
            LineType::DoubleDashed => (self.pen.with_style(PenStyle::Dashed), &[-0.5, 0.5][..]),
            LineType::Heavy        => (self.pen.with_width(self.widths.heavy), &[0.0][..]),
        };
        let mut paint = ScopedPaint::new(canvas);
        paint.set_pen(pen);
        for offset in offsets {
            let p = pos + offset * self.widths.separation;
            if vertical {
                paint.draw_line(p, from, p, to);
            } else {
                paint.draw_line(from, p, to, p);
            }
        }
    }
}
