#[macro_use]
extern crate serde_derive;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;
use mathtext::css::named::NAMED_COLORS;
use mathtext::css::{color_to_string, parse_color, parse_linear_gradient, Rgba};
use mathtext::node::{ColumnAlign, EnvChange, LineType, Node};
use mathtext::parser::environments::parse_column_spec;

#[derive(Debug, Serialize, Deserialize)]
struct Colors {
    #[serde(rename="Valid")]
    valid:   BTreeMap<String, [u8; 4]>,
    #[serde(rename="Invalid")]
    invalid: Vec<String>,
}

fn colors() -> Colors {
    common::load_yaml("tests/data/colors.yaml")
}

#[test]
fn color_values() {
    let colors = colors();
    for (input, [r, g, b, a]) in colors.valid {
        eprintln!("Input: {:?}", input);
        assert_eq!(parse_color(&input), Ok(Rgba::new(r, g, b, a)));
    }
    for input in colors.invalid {
        eprintln!("Input: {:?}", input);
        assert!(parse_color(&input).is_err());
    }
}

#[test]
fn colors_survive_printing() {
    let mut rng = StdRng::seed_from_u64(7);
    let random: Vec<Rgba> = (0..500).map(|_| Rgba::new(rng.gen(), rng.gen(), rng.gen(), rng.gen())).collect();
    let opaque: Vec<Rgba> = (0..200).map(|_| Rgba::new(rng.gen(), rng.gen(), rng.gen(), 255)).collect();
    let named: Vec<Rgba> = NAMED_COLORS.iter().map(|&(_, color)| color).collect();
    let edges = [Rgba::BLACK, Rgba::TRANSPARENT, Rgba::new(255, 255, 255, 254), Rgba::new(0, 0, 0, 1)];
    for color in random.into_iter().chain(opaque).chain(named).chain(edges) {
        let printed = color_to_string(color);
        eprintln!("Input: {:?} -> {:?}", color, printed);
        assert_eq!(parse_color(&printed), Ok(color));
    }
}

#[test]
fn hue_units_agree() {
    let turn = parse_color("hsv(0.5turn 127 127)").unwrap();
    assert_eq!(parse_color("hsv(180deg 127 127)"), Ok(turn));
    assert_eq!(parse_color("hsv(200grad 127 127)"), Ok(turn));
}

/// `\textcolor` reads its argument with the same parser
#[test]
fn colors_in_formulas() {
    let colors = colors();
    for (input, [r, g, b, a]) in colors.valid {
        let tex = format!(r"\textcolor{{{}}}{{x}}", input);
        eprintln!("Input: {:?}", tex);
        let math = common::math(&tex);
        assert!(math.diagnostics().is_empty());
        match *math.root() {
            Node::ModifyEnvironment(ref m) => assert_eq!(m.changes(), &[EnvChange::Color(Rgba::new(r, g, b, a))]),
            ref other => panic!("{:?}", other),
        }
    }
    for input in colors.invalid {
        let tex = format!(r"\textcolor{{{}}}{{x}}", input);
        eprintln!("Input: {:?}", tex);
        assert_eq!(common::math(&tex).diagnostics().len(), 1);
    }
}

#[test]
fn gradients() {
    let gradient = parse_linear_gradient("linear-gradient(to right, red, #00F)").unwrap();
    assert_eq!(gradient.start, (0.0, 0.5));
    assert_eq!(gradient.end, (1.0, 0.5));
    assert_eq!(gradient.stops.len(), 2);
    assert_eq!(gradient.stops[0].position, 0.0);
    assert_eq!(gradient.stops[1].position, 1.0);
    assert_eq!(gradient.stops[1].color, Rgba::new(0, 0, 255, 255));

    let gradient = parse_linear_gradient("linear-gradient(red 20%, white, black)").unwrap();
    let positions: Vec<f64> = gradient.stops.iter().map(|s| s.position).collect();
    assert_eq!(positions.len(), 3);
    assert!((positions[1] - 0.6).abs() < 1e-9, "{:?}", positions);

    assert!(parse_linear_gradient("radial-gradient(red, blue)").is_err());
}

#[test]
fn random_column_specs() {
    const PIECES: &[&str] = &["l", "c", "r", "|", "||", ":", "::", " ", "x", "p"];
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let len = rng.gen_range(0..12);
        let spec: String = (0..len).map(|_| PIECES[rng.gen_range(0..PIECES.len())]).collect();
        eprintln!("Input: {:?}", spec);
        let (columns, errors) = parse_column_spec(&spec);

        let expected: Vec<ColumnAlign> = spec.chars().filter_map(|c| match c {
            'l' => Some(ColumnAlign::Left),
            'c' => Some(ColumnAlign::Center),
            'r' => Some(ColumnAlign::Right),
            _   => None,
        }).collect();
        assert_eq!(columns.alignments, expected);
        assert_eq!(columns.vertical_lines.len(), columns.alignments.len() + 1);
        assert_eq!(errors.len(), spec.chars().filter(|&c| c == 'x' || c == 'p').count());
        if !spec.contains(['|', ':']) {
            assert!(columns.vertical_lines.iter().all(|&line| line == LineType::None));
        }
    }
}
