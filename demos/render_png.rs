//! Renders a formula to a PNG file.
//!
//! ```bash
//! cargo run --example render-png --features tinyskia-renderer,ttfparser-fontparser -- \
//!     --font resources/FreeSerif.otf --output formula.png '\sqrt{a^2+b^2}'
//! ```

use std::path::PathBuf;

use clap::Parser;
use mathtext::css::{parse_color, Rgba};
use mathtext::font::backend::ttf_parser::TtfFontMetrics;
use mathtext::render::tinyskia::TinySkiaCanvas;
use mathtext::{LayoutSettings, MathText};

#[derive(Parser, Debug)]
#[command(about = "Render a LaTeX formula to a PNG image")]
struct Args {
    /// Formula to render
    formula: String,

    /// Font file used for all text
    #[arg(short, long)]
    font: PathBuf,

    /// Where to write the image
    #[arg(short, long, default_value = "formula.png")]
    output: PathBuf,

    /// Font size in points
    #[arg(short, long, default_value_t = 24.0)]
    size: f64,

    /// Pixels per point
    #[arg(long, default_value_t = 2.0)]
    scale: f64,

    /// Background color, any CSS color
    #[arg(long, default_value = "white")]
    background: String,

    /// YAML file overriding layout settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Outline the box of every node
    #[arg(long)]
    draw_boxes: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let settings: LayoutSettings = match args.settings {
        Some(ref path) => serde_yaml::from_reader(std::fs::File::open(path)?)?,
        None => LayoutSettings::default(),
    };
    let background = parse_color(&args.background).unwrap_or(Rgba::TRANSPARENT);

    let font_data = std::fs::read(&args.font)?;
    let mut metrics = TtfFontMetrics::new();
    metrics.load("serif", &font_data)?;

    let mut math = MathText::builder()
        .settings(settings)
        .font_size(args.size)
        .draw_boxes(args.draw_boxes)
        .build();
    if !math.parse(&args.formula) {
        for diagnostic in math.diagnostics() {
            eprintln!("{}", diagnostic);
        }
    }

    let size = math.measure(&metrics);
    let mut canvas = TinySkiaCanvas::for_size(&size, args.scale)
        .ok_or("formula has an empty size")?
        .with_fonts(&metrics);
    canvas.fill(background);
    math.draw(&mut canvas, &metrics, 0.0, size.baseline_height);

    canvas.pixmap().save_png(&args.output)?;
    eprintln!("written to {}", args.output.display());
    Ok(())
}
