#[macro_use]
extern crate serde_derive;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;
use common::debug_render::DebugRender;
use common::{measure, render};
use mathtext::font::FixedMetrics;
use mathtext::render::bbox::BBoxCanvas;

const LAYOUT_YAML: &str = "tests/data/layout.yaml";

#[derive(Debug, Serialize, Deserialize)]
struct Tests(BTreeMap<String, Vec<Category>>);

#[derive(Debug, Serialize, Deserialize)]
struct Category {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Snippets")]
    snippets: Vec<String>,
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Every snippet is drawn inside the box it measures, and ends where its width says
#[test]
fn drawings_stay_in_their_box() {
    common::init_logger();
    let tests: Tests = common::load_yaml(LAYOUT_YAML);
    let metrics = FixedMetrics::new();
    // ink may overhang the advance box a little, e.g. italic letters
    const SLACK: f64 = 1.0;

    for (category, collection) in tests.0.iter() {
        for snippets in collection {
            for equation in &snippets.snippets {
                eprintln!("Input: {} / {}: {:?}", category, snippets.description, equation);
                let math = common::math(equation);
                assert!(math.diagnostics().is_empty(), "{:?}", math.diagnostics());

                let size = math.measure(&metrics);
                assert!(size.width > 0.0 && size.overall_height > 0.0);

                let y = size.baseline_height;
                let mut canvas = BBoxCanvas::new(&metrics);
                let end = math.draw(&mut canvas, &metrics, 0.0, y);
                assert!(close(end, size.width));
                assert_eq!(canvas.depth(), 0);

                let drawn = canvas.finish().expect("nothing drawn");
                let bbox = mathtext::geometry::BBox::from_dims(0.0, 0.0, size.width, size.overall_height);
                assert!(bbox.contains(&drawn, SLACK), "{:?} does not contain {:?}", bbox, drawn);
            }
        }
    }
}

#[test]
fn sub_and_superscript_share_their_position() {
    let base = measure("$x$").width;
    let sub = measure("$x_a$").width;
    let sup = measure("$x^b$").width;
    let both = measure("$x_a^b$").width;
    let sequential = sub + sup - base;
    assert!(both < sequential - 0.1, "{} vs {}", both, sequential);
    assert!(both >= sub.max(sup) - 1e-6);
}

#[test]
fn limits_go_above_and_below() {
    let limits = measure(r"$\int_a^b$");
    let beside = measure(r"$\int\nolimits_a^b$");
    assert!(limits.overall_height > beside.overall_height);

    let sum = measure(r"$\sum_{i=0}^{n}$");
    let plain = measure(r"$\sum$");
    assert!(sum.baseline_height > plain.baseline_height);
    assert!(sum.descent() > plain.descent());
}

#[test]
fn fractions_stack() {
    let a = measure("$a$");
    let b = measure("$b$");
    let frac = measure(r"$\frac{a}{b}$");
    assert!(frac.overall_height > a.overall_height + b.overall_height);
    assert!(frac.width >= a.width.max(b.width));
}

#[test]
fn matrices_grow_with_their_cells() {
    let one = measure(r"$\begin{matrix} a \end{matrix}$");
    let row = measure(r"$\begin{matrix} a & a \end{matrix}$");
    let column = measure(r"$\begin{matrix} a \\ a \end{matrix}$");
    assert!(row.width > 2.0 * measure("$a$").width);
    assert!(row.width > one.width);
    assert!(close(row.overall_height, one.overall_height));
    assert!(column.overall_height > 2.0 * one.overall_height - 1e-6);

    let bare = measure(r"$\begin{matrix} 1 & 0 \\ 0 & 1 \end{matrix}$");
    let parens = measure(r"$\begin{pmatrix} 1 & 0 \\ 0 & 1 \end{pmatrix}$");
    assert!(parens.width > bare.width);
    assert!(parens.overall_height >= bare.overall_height);

    // a border rule replaces the minimal padding
    let ruled = measure(r"$\begin{array}{|c|} a \end{array}$");
    let plain = measure(r"$\begin{array}{c} a \end{array}$");
    assert!(ruled.width > plain.width);
}

#[test]
fn braces_enclose_their_contents() {
    let frac = measure(r"$\frac{a}{b}$");
    let braced = measure(r"$\left( \frac{a}{b} \right)$");
    assert!(braced.overall_height >= frac.overall_height);
    assert!(braced.width > frac.width);

    let heights: Vec<f64> = [r"\bigl(", r"\Bigl(", r"\biggl(", r"\Biggl("].iter()
        .map(|b| measure(&format!("${}$", b)).overall_height)
        .collect();
    eprintln!("Heights: {:?}", heights);
    assert!(heights.windows(2).all(|w| w[0] <= w[1] + 1e-9));
    assert!(heights[3] > heights[0]);
}

#[test]
fn boxes_surround_their_contents() {
    let plain = measure("Ag");
    for tex in [r"\fbox{Ag}", r"\doublebox{Ag}", r"\ovalbox{Ag}", r"\colorbox{red}{Ag}", r"\fcolorbox{red}{blue}{Ag}"] {
        eprintln!("Input: {:?}", tex);
        let boxed = measure(tex);
        assert!(boxed.width > plain.width);
        assert!(boxed.baseline_height > plain.baseline_height);
        assert!(boxed.descent() > plain.descent());
        // the padding is the same on every side
        let side = (boxed.width - plain.width) / 2.0;
        assert!(close(boxed.baseline_height - plain.baseline_height, side));
    }
    let snug = measure(r"\snugshade{yellow}{Ag}");
    assert!(close(snug.width, plain.width));
}

#[test]
fn lines_stack_downwards() {
    let one = measure("ab");
    let two = measure(r"ab\\ab");
    let three = measure(r"ab\\ab\\ab");
    assert!(close(two.width, one.width));
    assert!(close(two.baseline_height, one.baseline_height));
    assert!(two.overall_height > 2.0 * one.overall_height - 1e-6);
    assert!(close(three.overall_height - two.overall_height, two.overall_height - one.overall_height));

    // a stack packs its lines tighter than a paragraph
    let stack = measure(r"$\substack{a \\ a}$");
    let paragraph = measure(r"\begin{center}$a$\\$a$\end{center}");
    assert!(stack.overall_height <= paragraph.overall_height + 1e-6);

    let centered = render(r"\begin{center}a\\aaaa\end{center}", "centered");
    let left = render(r"\begin{flushleft}a\\aaaa\end{flushleft}", "left");
    assert!(centered.render.text_positions()[0].0 > left.render.text_positions()[0].0);
}

/// Measuring twice gives the same size: nodes keep no state between calls
#[test]
fn measuring_is_repeatable() {
    let tests: Tests = common::load_yaml(LAYOUT_YAML);
    let metrics = FixedMetrics::new();
    let mut rng = StdRng::seed_from_u64(0x6964_656d);
    let mut formulas: Vec<String> = tests.0.values().flatten().flat_map(|c| c.snippets.iter().cloned()).collect();
    let fragments = [r"\frac{a}{b}", "x^2", r"\fbox{y}", r"\\", r"\sqrt{z}", r"\bf", " q"];
    for _ in 0 .. 50 {
        let len = rng.gen_range(1 ..= 6);
        formulas.push((0 .. len).map(|_| fragments[rng.gen_range(0 .. fragments.len())]).collect());
    }

    for tex in formulas {
        eprintln!("Input: {:?}", tex);
        let math = common::math(&tex);
        let first = math.measure(&metrics);
        let second = math.measure(&metrics);
        assert_eq!(first, second);
        let mut canvas = BBoxCanvas::new(&metrics);
        math.draw(&mut canvas, &metrics, 0.0, 0.0);
        assert_eq!(math.measure(&metrics), first);
    }
}

#[test]
fn colors_reach_the_canvas() {
    let equation = render(r"a \textcolor{red}{b} {\color{#00F} c} d", "colors");
    let colors = equation.render.text_colors();
    let texts = equation.render.texts();
    eprintln!("Texts: {:?}, colors: {:?}", texts, colors);
    let color_of = |t: &str| texts.iter().position(|&s| s.contains(t)).map(|i| colors[i]);
    assert_eq!(color_of("a"), Some(mathtext::css::Rgba::BLACK));
    assert_eq!(color_of("b"), Some(mathtext::css::Rgba::new(255, 0, 0, 255)));
    assert_eq!(color_of("c"), Some(mathtext::css::Rgba::new(0, 0, 255, 255)));
    assert_eq!(color_of("d"), Some(mathtext::css::Rgba::BLACK));
}

/// Random soups of formula fragments, well-formed or not, are always measured and drawn consistently
#[test]
fn random_formulas() {
    const FRAGMENTS: &[&str] = &[
        "x", "12", " ", "+", "=", "(", ")", "[", "]", "{", "}", "$", "^", "_", "&", r"\\", "~",
        r"\frac", r"\sqrt", r"\left(", r"\right)", r"\bigl[", r"\alpha", r"\sum", r"\int", r"\limits",
        r"\hat", r"\overline", r"\textbf", r"\bf", r"\large", r"\textcolor{red}", r"\color{blue}", r"\,", r"\quad",
        r"\begin{matrix}", r"\end{matrix}", r"\begin{array}{c|c}", r"\end{array}", r"\hline", r"\begin{cases}",
        r"\end{cases}", r"\text", r"\foo", r"\binom", r"\underbrace", r"\mathbb", r"\verb|x|",
        r"\fbox", r"\colorbox{red}", r"\substack", r"\begin{center}", r"\end{center}", r"\begin{framed}",
        r"\end{framed}", r"\begin{verbatim}", r"\end{verbatim}", r"\scriptstyle", r"\uppercase", r"\begin{foo}",
    ];
    let mut rng = StdRng::seed_from_u64(0x6d61_7468);
    let metrics = FixedMetrics::new();

    for _ in 0 .. 500 {
        let len = rng.gen_range(1 ..= 12);
        let tex: String = (0 .. len).map(|_| FRAGMENTS[rng.gen_range(0 .. FRAGMENTS.len())]).collect();
        eprintln!("Input: {:?}", tex);

        let math = common::math(&tex);
        let size = math.measure(&metrics);
        assert!(size.width.is_finite() && size.width >= 0.0);
        assert!(size.overall_height.is_finite());

        let mut canvas = DebugRender::default();
        let end = math.draw(&mut canvas, &metrics, 0.0, 0.0);
        assert!(close(end, size.width), "{} vs {}", end, size.width);
        assert_eq!(canvas.depth(), 0);
    }
}
