//! Sizes of laid-out nodes and the parameters of the layout.
//!
//! Every node computes a [`NodeSize`] bottom-up from the sizes of its children; the numbers that
//! decide how children are placed relative to one another (how much smaller a superscript is, how far
//! the numerator of a fraction sits above the fraction line ...) are collected in [`LayoutSettings`].
//!
//! ## Coordinates
//!
//! As in most 2D graphics APIs, y grows downwards. A node is drawn at a position `(x, y)` where `y` is its
//! baseline: its ink extends from `y - baseline_height` to `y - baseline_height + overall_height`.

pub mod constants;

use crate::environment::{Environment, FontSettings};
use crate::font::{FontMetrics, FontRequest, Rect};
use self::constants::{ABS_MIN_LINE_WIDTH, SIZE_SANITY_CEILING};


/// Size of a laid-out node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    /// horizontal advance
    pub width:                    f64,
    /// distance from the top of the node to the baseline
    pub baseline_height:          f64,
    /// distance from the top to the bottom of the node
    pub overall_height:           f64,
    /// height of the strike-out line above the baseline
    pub strikeout_pos:            f64,
    /// horizontal shift of limits placed above/below the node (integrals are slanted)
    pub sub_super_x_correction:   f64,
    /// horizontal shift of a subscript placed beside the node (italic correction)
    pub sub_besides_x_correction: f64,
}

impl NodeSize {
    /// Distance from the baseline to the bottom of the node
    pub fn descent(&self) -> f64 {
        self.overall_height - self.baseline_height
    }

    /// Copies the fields of `fresh` into `self`, except for those which are not finite or larger than
    /// [`SIZE_SANITY_CEILING`].
    pub fn update_from(&mut self, fresh: &NodeSize) {
        fn keep(old: &mut f64, new: f64) {
            if new.is_finite() && new.abs() < SIZE_SANITY_CEILING {
                *old = new;
            } else {
                warn!("discarding implausible size value {}", new);
            }
        }
        keep(&mut self.width, fresh.width);
        keep(&mut self.baseline_height, fresh.baseline_height);
        keep(&mut self.overall_height, fresh.overall_height);
        keep(&mut self.strikeout_pos, fresh.strikeout_pos);
        keep(&mut self.sub_super_x_correction, fresh.sub_super_x_correction);
        keep(&mut self.sub_besides_x_correction, fresh.sub_besides_x_correction);
    }

    /// Grows `self` vertically so that it also covers `other`, both sitting on the same baseline.
    pub fn cover(&mut self, other: &NodeSize) {
        if other.baseline_height > self.baseline_height {
            self.overall_height += other.baseline_height - self.baseline_height;
            self.baseline_height = other.baseline_height;
            self.strikeout_pos = other.strikeout_pos;
        }
        if self.baseline_height + other.descent() > self.overall_height {
            self.overall_height = self.baseline_height + other.descent();
            self.strikeout_pos = other.strikeout_pos;
        }
    }
}


/// The tunable factors of the layout. Lengths are relative to the current font (its size, or the size of a
/// reference glyph, as documented per field).
///
/// Every field has a default, so a partial YAML or JSON document is enough to override some of them:
///
/// ```
/// # use mathtext::LayoutSettings;
/// let settings: LayoutSettings = serde_json::from_str(r#"{ "frac_shift_factor": 0.5 }"#).unwrap();
/// assert_eq!(settings.frac_shift_factor, 0.5);
/// assert_eq!(settings.brace_factor, LayoutSettings::default().brace_factor);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// braces are this much taller than their contents
    pub brace_factor:                          f64,
    /// font size of sub- and superscripts relative to their base
    pub subsuper_size_factor:                  f64,
    /// italic correction of sub- and superscripts, relative to the width of a space
    pub italic_correction_factor:              f64,
    /// font size of limits placed above/below an operator relative to the operator
    pub operatorsubsuper_size_factor:          f64,
    /// distance between an operator and its limits, relative to the x-height
    pub operatorsubsuper_distance_factor:      f64,
    /// space added around an operator with limits, relative to the width of "x"
    pub operatorsubsuper_extraspace_factor:    f64,
    /// width of operators in math mode relative to their glyph
    pub mathoperator_width_factor:             f64,
    /// height of the bottom of a superscript above the baseline, relative to the x-height
    pub super_shift_factor:                    f64,
    /// height of the top of a subscript above the baseline, relative to the x-height of the subscript
    pub sub_shift_factor:                      f64,
    /// after a tall node, the superscript overlaps the node's top by this fraction of its own ascent
    pub special_super_shift_factor:            f64,
    /// after a deep node, the subscript starts this fraction of its ascent below the node's bottom
    pub special_sub_shift_factor:              f64,
    /// a preceding node counts as tall or deep if it exceeds the font's ascent/descent by this factor
    pub subsuper_mode_selection_by_size_factor: f64,
    /// font size of numerator and denominator
    pub frac_factor:                           f64,
    /// additional font size factor of `\tfrac` and `\stfrac`
    pub frac_nested_factor:                    f64,
    /// distance between the fraction line and numerator/denominator, relative to the x-height
    pub frac_shift_factor:                     f64,
    /// font size of the text under an `\underbrace`
    pub underbrace_factor:                     f64,
    /// distance between an `\underbrace` and its contents, relative to the x-height
    pub underbrace_separation_xfactor:         f64,
    /// height of an `\underbrace`, relative to the height of "M"
    pub underbrace_braceheight_xfactor:        f64,
    /// font size of the text of `\underset` and `\overset`
    pub underset_factor:                       f64,
    /// height of decorations (`\hat`, `\vec` ...) relative to the ascent of their contents
    pub decoration_height_factor:              f64,
    /// distance between a decoration and its contents, relative to the ascent
    pub decoration_separation_factor:          f64,
    /// wide decorations are shortened by this fraction of the width of "X" on each side
    pub decoration_width_reduction_xfactor:    f64,
    /// width of the root sign relative to the width of "X"
    pub sqrt_width_xfactor:                    f64,
    /// height of the root sign relative to its contents
    pub sqrt_height_factor:                    f64,
    /// font size of the degree of a root
    pub sqrt_smallfont_factor:                 f64,
    /// width of thin matrix rules, relative to the line width of the font
    pub matrix_linewidth_thin_factor:          f64,
    /// width of heavy matrix rules (`\toprule`, `\bottomrule`), relative to the width of thin rules
    pub matrix_linewidth_heavy_factor:         f64,
    /// distance between the two lines of a double rule, relative to the width of thin rules
    pub matrix_line_separation_factor:         f64,
    /// space between columns, relative to the width of "x"
    pub matrix_x_separation_factor:            f64,
    /// space between rows, relative to the width of "x"
    pub matrix_y_separation_factor:            f64,
    /// space between a vertical border rule and the cells, relative to the width of "x"
    pub matrix_x_padding_factor:               f64,
    /// space between a horizontal border rule and the cells, relative to the width of "x"
    pub matrix_y_padding_factor:               f64,
    /// limits of integrals move right (top) and left (bottom) by this fraction of the glyph width
    pub int_subsuper_xcorrection_factor:       f64,
    /// subscripts of integrals move left by this fraction of the width of "X"
    pub int_subbesides_xcorrection_xfactor:    f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            brace_factor:                           1.04,
            subsuper_size_factor:                   0.7,
            italic_correction_factor:               0.4,
            operatorsubsuper_size_factor:           0.65,
            operatorsubsuper_distance_factor:       0.25,
            operatorsubsuper_extraspace_factor:     0.5,
            mathoperator_width_factor:              1.5,
            super_shift_factor:                     0.7,
            sub_shift_factor:                       0.4,
            special_super_shift_factor:             0.4,
            special_sub_shift_factor:               0.4,
            subsuper_mode_selection_by_size_factor: 1.01,
            frac_factor:                            1.0,
            frac_nested_factor:                     0.7,
            frac_shift_factor:                      0.4,
            underbrace_factor:                      0.75,
            underbrace_separation_xfactor:          0.25,
            underbrace_braceheight_xfactor:         0.5,
            underset_factor:                        0.7,
            decoration_height_factor:               0.3,
            decoration_separation_factor:           0.1,
            decoration_width_reduction_xfactor:     0.2,
            sqrt_width_xfactor:                     0.8,
            sqrt_height_factor:                     1.2,
            sqrt_smallfont_factor:                  0.57,
            matrix_linewidth_thin_factor:           0.4,
            matrix_linewidth_heavy_factor:          4.0,
            matrix_line_separation_factor:          2.0,
            matrix_x_separation_factor:             1.0,
            matrix_y_separation_factor:             1.0,
            matrix_x_padding_factor:                1.0,
            matrix_y_padding_factor:                1.0,
            int_subsuper_xcorrection_factor:        0.25,
            int_subbesides_xcorrection_xfactor:     0.33,
        }
    }
}


/// Everything a node needs besides its [`Environment`] to be measured or drawn.
#[derive(Clone, Copy)]
pub struct MathContext<'a> {
    /// layout factors
    pub settings:   &'a LayoutSettings,
    /// families of the font roles
    pub fonts:      &'a FontSettings,
    /// the measuring device
    pub metrics:    &'a dyn FontMetrics,
    /// draw the box of every node, for debugging
    pub draw_boxes: bool,
}

impl<'a> MathContext<'a> {
    /// Creates a context which does not draw debug boxes
    pub fn new(settings: &'a LayoutSettings, fonts: &'a FontSettings, metrics: &'a dyn FontMetrics) -> Self {
        Self { settings, fonts, metrics, draw_boxes: false }
    }

    /// Font of the environment
    pub fn font(&self, env: &Environment) -> FontRequest {
        env.font_request(self.fonts)
    }

    /// Box of `text`, including the side bearings and the full ascent/descent of the font
    pub fn loose_rect(&self, env: &Environment, text: &str) -> Rect {
        self.metrics.bounding_rect(&self.font(env), text)
    }

    /// Box of the ink of `text`
    pub fn tight_rect(&self, env: &Environment, text: &str) -> Rect {
        self.metrics.tight_bounding_rect(&self.font(env), text)
    }

    /// Line width matching the font, never below [`ABS_MIN_LINE_WIDTH`]
    pub fn line_width(&self, env: &Environment) -> f64 {
        self.metrics.line_width(&self.font(env)).max(ABS_MIN_LINE_WIDTH)
    }

    /// Height of the letter "x"
    pub fn x_height(&self, env: &Environment) -> f64 {
        self.metrics.x_height(&self.font(env))
    }

    /// Height of the strike-out line above the baseline
    pub fn strikeout_pos(&self, env: &Environment) -> f64 {
        self.metrics.strikeout_pos(&self.font(env))
    }

    /// Ascent of the font
    pub fn ascent(&self, env: &Environment) -> f64 {
        self.metrics.ascent(&self.font(env))
    }

    /// Descent of the font
    pub fn descent(&self, env: &Environment) -> f64 {
        self.metrics.descent(&self.font(env))
    }
}
