#[macro_use]
extern crate serde_derive;

mod common;

use common::debug_render::DebugRender;
use mathtext::font::FixedMetrics;
use mathtext::MathText;


#[derive(Debug, Serialize, Deserialize)]
struct Tests {
    #[serde(rename="Pass")]
    pass: Vec<String>,
    #[serde(rename="Fail")]
    fail: Vec<String>,
}

/// Measures and draws, checking that the drawing ends where the measure says
fn draw(math: &MathText) -> Result<(), String> {
    let metrics = FixedMetrics::new();
    let size = math.measure(&metrics);
    if !(size.width.is_finite() && size.overall_height.is_finite()) {
        return Err(format!("implausible size {:?}", size));
    }
    let mut canvas = DebugRender::default();
    let end = math.draw(&mut canvas, &metrics, 0.0, 0.0);
    if (end - size.width).abs() > 1e-6 {
        return Err(format!("drawing ends at {} but the width is {}", end, size.width));
    }
    if canvas.depth() != 0 {
        return Err(format!("{} paint states left on the canvas", canvas.depth()));
    }
    Ok(())
}

#[test]
fn pass_fail() {
    common::init_logger();
    let tests: Tests = common::load_yaml("tests/data/passfail.yaml");
    let mut fail = 0;

    for test in tests.pass {
        let mut math = MathText::new();
        let clean = math.parse(&test);
        match draw(&math) {
            Ok(()) if clean => continue,
            Ok(()) => {
                println!("Tex: {}", test);
                println!("Should have passed, reported: {:?}", math.diagnostics());
                fail += 1;
            },
            Err(err) => {
                println!("Tex: {}", test);
                println!("Should have passed, failed with: {}", err);
                fail += 1;
            },
        }
    }

    for test in tests.fail {
        let mut math = MathText::new();
        let clean = math.parse(&test);
        if clean {
            println!("Tex: {}", test);
            println!("Should have been reported");
            fail += 1;
        }
        // reported formulas are still drawn
        if let Err(err) = draw(&math) {
            println!("Tex: {}", test);
            println!("Failed to draw: {}", err);
            fail += 1;
        }
    }

    if fail > 0 {
        panic!("{} Pass/Fail tests failed.", fail);
    }
}
