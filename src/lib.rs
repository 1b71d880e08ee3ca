/*! # A typesetting engine for LaTeX-like math and rich text.

This library takes a string written in a subset of LaTeX (e.g. `The area is $\pi r^2$`) and measures it, draws it
on a canvas or exports it to HTML. Text outside of `$ .. $` is rich text (`\textbf`, `\textcolor`, `\large` ...),
text inside is math (fractions, roots, sub- and superscripts, matrices, braces, decorations ...).
Text can be broken into lines with `\\` or laid out in `center`/`flushleft`/`flushright` environments, and framed
with `\fbox`, `\colorbox` and friends.

## Basic usage

To draw a formula, you need two ingredients: something measuring text, implementing [`FontMetrics`], and a surface,
implementing [`Canvas`].

Both are traits. The crate provides [`FixedMetrics`](crate::font::FixedMetrics), deterministic metrics which need no
font file, and [`BBoxCanvas`](crate::render::bbox::BBoxCanvas), which records the area drawn to.
With features `ttfparser-fontparser` and `tinyskia-renderer`, real fonts can be measured with
`TtfFontMetrics` and drawn onto a `tiny_skia::Pixmap` with `TinySkiaCanvas`.

```
use mathtext::font::FixedMetrics;
use mathtext::render::bbox::BBoxCanvas;
use mathtext::environment::Environment;

let metrics = FixedMetrics::new();
let mut canvas = BBoxCanvas::new(&metrics);
let end_x = mathtext::render(r"$e = \lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^n$", &mut canvas, &metrics, 0.0, 20.0, &Environment::default());
assert!(end_x > 0.0);
```

Notes:

 - `render` draws the formula with its baseline at the given `y`.
 - Lengths are in the unit of the canvas, font sizes being given in points (`Environment::font_size`).

## More complex cases

You sometimes need more control, e.g. to know the size of a formula before drawing it, to look at the problems found
in the input, or to change the factors of the layout. [`MathText`] keeps a parsed formula along with its settings:

```
use mathtext::MathText;
use mathtext::font::FixedMetrics;
use mathtext::render::bbox::BBoxCanvas;

let mut math = MathText::builder()
    .font_size(12.0)
    .build();
assert!(math.parse(r"$\frac{a}{b}$"));

let metrics = FixedMetrics::new();
let size = math.measure(&metrics);

// center vertically in a 100 unit high area
let y = (100.0 - size.overall_height) / 2.0 + size.baseline_height;
let mut canvas = BBoxCanvas::new(&metrics);
math.draw(&mut canvas, &metrics, 0.0, y);
```

Malformed input does not prevent drawing; the problems are kept as [`Diagnostic`](crate::error::Diagnostic)s:

```
let mut math = mathtext::MathText::new();
assert!(!math.parse(r"$\frac{a}{b$ \foo"));
assert_eq!(math.diagnostics().len(), 2);
```

The steps performed by [`MathText`] can be run one by one as well:

  1. Parsing the formula into a [`Node`](crate::node::Node) tree, cf [`parse`](crate::parser::parse).
  2. Measuring the tree with [`Node::compute_size`](crate::node::Node::compute_size). This requires an
     [`Environment`](crate::environment::Environment), the starting style, and a [`MathContext`](crate::layout::MathContext)
     bundling the [`LayoutSettings`], the [`FontSettings`](crate::environment::FontSettings) and the metrics.
  3. Drawing the tree with [`Node::draw`](crate::node::Node::draw).

## Implementing backends

### Font metrics

The [`FontMetrics`] trait answers questions about a concrete [`FontRequest`](crate::font::FontRequest): the boxes of
strings, the ascent and descent of the font, the line width matching it, and whether it has a glyph for a character.
The latter drives the fallback search for symbols, see [`resolve_symbol`](crate::environment::resolve_symbol).

### Canvas

The [`Canvas`] trait consists of drawing operations (text, lines, rectangles, ellipses, paths) and of a stack of paint
states. Nodes change the paint state through a [`ScopedPaint`](crate::render::ScopedPaint) guard only.
*/



#[macro_use]
extern crate serde_derive;



#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod css;
#[deny(missing_docs)]
pub mod environment;
pub mod font;
pub mod geometry;
#[deny(missing_docs)]
pub mod layout;
#[deny(missing_docs)]
pub mod node;
#[deny(missing_docs)]
pub mod parser;
#[deny(missing_docs)]
pub mod render;
pub mod symbols;

pub use layout::LayoutSettings;
pub use render::Canvas;
pub use font::FontMetrics;

use css::Rgba;
use environment::{Environment, FontRole, FontSettings};
use error::Diagnostic;
use font::FontDatabase;
use layout::{MathContext, NodeSize};
use node::Node;


/// A parsed formula, together with everything needed to measure and draw it.
#[derive(Debug, Clone)]
pub struct MathText {
    settings:    LayoutSettings,
    fonts:       FontSettings,
    env:         Environment,
    draw_boxes:  bool,
    root:        Node,
    diagnostics: Vec<Diagnostic>,
}

impl Default for MathText {
    fn default() -> Self {
        MathTextBuilder::new().build()
    }
}

impl MathText {
    /// An empty formula with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts configuring a formula
    pub fn builder() -> MathTextBuilder<'static> {
        MathTextBuilder::new()
    }

    /// Parses `text`, replacing the formula held so far.
    /// Returns `true` if no problem was found; the problems are available from [`MathText::diagnostics`].
    pub fn parse(&mut self, text: &str) -> bool {
        let (root, diagnostics) = parser::parse(text, self.env.font_size);
        debug!("parsed {:?} into {} nodes, {} diagnostics", text, root.count(), diagnostics.len());
        self.root = root;
        self.diagnostics = diagnostics;
        self.diagnostics.is_empty()
    }

    /// Problems found by the last call to [`MathText::parse`]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Root of the node tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The style the formula starts with
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The factors of the layout
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Families of the font roles
    pub fn fonts(&self) -> &FontSettings {
        &self.fonts
    }

    fn context<'a>(&'a self, metrics: &'a dyn FontMetrics) -> MathContext<'a> {
        MathContext {
            settings:   &self.settings,
            fonts:      &self.fonts,
            metrics,
            draw_boxes: self.draw_boxes,
        }
    }

    /// Size of the formula
    pub fn measure(&self, metrics: &dyn FontMetrics) -> NodeSize {
        self.root.compute_size(&self.env, &self.context(metrics), None)
    }

    /// Draws the formula with its baseline starting at `(x, y)` and returns the x coordinate where it ends
    pub fn draw(&self, canvas: &mut dyn Canvas, metrics: &dyn FontMetrics, x: f64, y: f64) -> f64 {
        self.root.draw(canvas, x, y, &self.env, &self.context(metrics), None)
    }

    /// The formula as HTML, or `None` if part of it cannot be expressed in HTML (matrices, decorations ...)
    pub fn to_html(&self) -> Option<String> {
        let mut html = String::new();
        if self.root.to_html(&mut html, &self.env, &self.env, &self.fonts) {
            Some(html)
        } else {
            None
        }
    }
}


/// Configures a [`MathText`].
///
/// ```
/// use mathtext::{MathText, LayoutSettings};
/// use mathtext::css::Rgba;
///
/// let math = MathText::builder()
///     .font_size(14.0)
///     .color(Rgba::new(0, 0, 255, 255))
///     .settings(LayoutSettings { brace_factor: 1.1, ..LayoutSettings::default() })
///     .build();
/// assert_eq!(math.environment().font_size, 14.0);
/// ```
pub struct MathTextBuilder<'d> {
    settings:   LayoutSettings,
    fonts:      FontSettings,
    env:        Environment,
    draw_boxes: bool,
    database:   Option<&'d dyn FontDatabase>,
}

impl<'d> MathTextBuilder<'d> {
    /// Default settings, 10pt black roman text
    pub fn new() -> Self {
        Self {
            settings:   LayoutSettings::default(),
            fonts:      FontSettings::default(),
            env:        Environment::default(),
            draw_boxes: false,
            database:   None,
        }
    }

    /// Factors of the layout
    pub fn settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Families of the font roles
    pub fn fonts(mut self, fonts: FontSettings) -> Self {
        self.fonts = fonts;
        self
    }

    /// Style the formula starts with. Replaces previous calls to `font_size`, `color` and `font`.
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.env.font_size = size;
        self
    }

    /// Text color
    pub fn color(mut self, color: Rgba) -> Self {
        self.env.color = color;
        self
    }

    /// Starting font
    pub fn font(mut self, role: FontRole) -> Self {
        self.env.font = role;
        self
    }

    /// Draw the box of every node on top of it
    pub fn draw_boxes(mut self, draw_boxes: bool) -> Self {
        self.draw_boxes = draw_boxes;
        self
    }

    /// Resolve generic family names (`serif`, `monospace` ...) of the font settings with `database` when building
    pub fn font_database<'n>(self, database: &'n dyn FontDatabase) -> MathTextBuilder<'n> {
        MathTextBuilder {
            settings:   self.settings,
            fonts:      self.fonts,
            env:        self.env,
            draw_boxes: self.draw_boxes,
            database:   Some(database),
        }
    }

    /// Builds an empty formula; fill it with [`MathText::parse`]
    pub fn build(self) -> MathText {
        symbols::init();
        let mut fonts = self.fonts;
        if let Some(database) = self.database {
            fonts.resolve_keywords(database);
        }
        MathText {
            settings:    self.settings,
            fonts,
            env:         self.env,
            draw_boxes:  self.draw_boxes,
            root:        Node::Noop,
            diagnostics: Vec::new(),
        }
    }
}

impl<'d> Default for MathTextBuilder<'d> {
    fn default() -> Self {
        Self::new()
    }
}


/// Draws `text` with its baseline starting at `(x, y)`, in the style `env` and with default settings.
/// Returns the x coordinate where the text ends.
pub fn render(text: &str, canvas: &mut dyn Canvas, metrics: &dyn FontMetrics, x: f64, y: f64, env: &Environment) -> f64 {
    let mut math = MathTextBuilder::new().environment(env.clone()).build();
    math.parse(text);
    math.draw(canvas, metrics, x, y)
}

/// Size of `text` in the style `env`, with default settings.
pub fn measure(text: &str, metrics: &dyn FontMetrics, env: &Environment) -> NodeSize {
    let mut math = MathTextBuilder::new().environment(env.clone()).build();
    math.parse(text);
    math.measure(metrics)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMetrics;
    use crate::render::bbox::BBoxCanvas;

    /// Every letter and digit in every font instruction can be measured and drawn.
    #[test]
    fn all_alphanumeric_style_combinations_must_work() {
        let metrics = FixedMetrics::new();
        let alphanumeric : Vec<_> =
            (0 .. 0x7F)
            .filter_map(std::primitive::char::from_u32)
            .filter(|c| c.is_alphanumeric())
            .collect();

        let envs = vec![
            None,
            Some("mathcal"),
            Some("mathrm"),
            Some("mathfrak"),
            Some("mathbb"),
            Some("textbf"),
        ];

        for env in envs {
            for character in alphanumeric.iter() {
                let formula = match env {
                    Some(env) => format!(r"${}{{{}}}$", env, character),
                    None => format!("${}$", character),
                };

                eprintln!("Input: {:?}", formula);
                let mut math = MathText::new();
                assert!(math.parse(&formula));
                let size = math.measure(&metrics);
                assert!(size.width > 0.0);
                let mut canvas = BBoxCanvas::new(&metrics);
                let end = math.draw(&mut canvas, &metrics, 0.0, 0.0);
                assert!((end - size.width).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn builder() {
        let math = MathText::builder()
            .font_size(20.0)
            .color(Rgba::new(255, 0, 0, 255))
            .font(FontRole::Sans)
            .draw_boxes(true)
            .build();
        assert_eq!(math.environment().font_size, 20.0);
        assert_eq!(math.environment().font, FontRole::Sans);
        assert!(math.draw_boxes);
        assert_eq!(*math.root(), Node::Noop);
    }

    #[test]
    fn sizes_follow_the_font_size() {
        let metrics = FixedMetrics::new();
        let small = measure("$x^2$", &metrics, &Environment::default());
        let large = measure("$x^2$", &metrics, &Environment { font_size: 20.0, ..Environment::default() });
        assert!((large.width - 2.0 * small.width).abs() < 1e-6);
        assert!((large.overall_height - 2.0 * small.overall_height).abs() < 1e-6);
    }

    #[test]
    fn html() {
        let mut math = MathText::new();
        math.parse(r"a\textbf{b}");
        let html = math.to_html().unwrap();
        assert!(html.contains("font-weight: bold;"));

        math.parse(r"$\hat{x}$");
        assert_eq!(math.to_html(), None);
    }

    #[test]
    fn reparsing_replaces_the_diagnostics() {
        let mut math = MathText::new();
        assert!(!math.parse(r"\foo"));
        assert_eq!(math.diagnostics().len(), 1);
        assert!(math.parse("foo"));
        assert!(math.diagnostics().is_empty());
    }
}
