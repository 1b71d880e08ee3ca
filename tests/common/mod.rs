#![allow(dead_code)]
pub mod debug_render;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mathtext::font::FixedMetrics;
use mathtext::layout::NodeSize;
use mathtext::MathText;
use self::debug_render::{DebugRender, Equation};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_yaml<T: serde::de::DeserializeOwned, P: AsRef<Path>>(path: P) -> T {
    let file = File::open(path.as_ref()).expect("failed to open test collection");
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).expect("failed to parse test collection")
}

/// Parses `tex`, ignoring its diagnostics
pub fn math(tex: &str) -> MathText {
    let mut math = MathText::new();
    math.parse(tex);
    math
}

pub fn measure(tex: &str) -> NodeSize {
    math(tex).measure(&FixedMetrics::new())
}

/// Draws `tex` on a recording canvas, baseline at y = 0
pub fn render(tex: &str, description: &str) -> Equation {
    let metrics = FixedMetrics::new();
    let math = math(tex);
    let size = math.measure(&metrics);
    let mut render = DebugRender::default();
    math.draw(&mut render, &metrics, 0.0, 0.0);
    Equation {
        tex:         tex.to_string(),
        description: description.to_string(),
        width:       size.width,
        height:      size.overall_height,
        render,
    }
}
