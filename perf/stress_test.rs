/// Parses and measures a very large number of formulas.
/// Its performance is monitored with `perf` to find out the main
/// cost centers of the parser and layout code.
///
/// Takes path to a .json file representing a list of strings (as below)
/// and prints how many of them parse without diagnostics.
///
/// ```json
/// [
///   "",
///   "X(3823)",
///   "\\texttt{TERM}_T",
///   "\\operatorname{Pic}(\\mathcal{O}_{\\Delta_0 d'^2})",
///   "m_\\alpha n_\\alpha = 3",
///   ...
///  ]
///  ```
///
/// Run with:
///
/// ```bash
/// CARGO_PROFILE_RELEASE_DEBUG=true cargo flamegraph --root --example stress-test -- PATH_TO_FILE
/// ```

use mathtext::font::FixedMetrics;
use mathtext::MathText;


fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let mut n_successes = 0;
	let mut n_parses    = 0;
	let mut width       = 0.0;

	let formulas_file_path = std::env::args().nth(1).ok_or("Usage: stress-test PATH")?;
	eprintln!("Formulas from: {}", formulas_file_path);

	let formulas_file = std::fs::File::open(&formulas_file_path)?;
	let formulas_buffer = std::io::BufReader::new(formulas_file);
	let formulas : Vec<String> = serde_json::from_reader(formulas_buffer)?;

	let metrics = FixedMetrics::new();
	let mut math = MathText::new();
	for formula in formulas.iter() {
		if math.parse(formula) {
			n_successes += 1;
		}
		width += math.measure(&metrics).width;
		n_parses += 1;
	}
	eprintln!("{} / {} (total width {:.1})", n_successes, n_parses, width);
	Ok(())
}
