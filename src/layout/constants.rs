//! Fixed constants of the layout and drawing code

/// A freshly computed size field larger than this (in absolute value) is discarded and the previous value kept.
/// Degenerate font metrics (a missing font, a zero-sized face ...) can otherwise blow sizes up.
pub const SIZE_SANITY_CEILING : f64 = 1e5;

/// Lines are never drawn thinner than this
pub const ABS_MIN_LINE_WIDTH  : f64 = 0.02;

// Parentheses, angle brackets and the like, in terms of the line width of the font (see `node::brace`)
/// Fraction of a brace's width covered by its glyph, the rest is left as space
pub const PAREN_FRACTION        : f64 = 0.75;
/// Stroke width at the tips of a parenthesis
pub const PAREN_TOP_WIDTH       : f64 = 0.75;
/// Stroke width at the middle of a parenthesis
pub const PAREN_CENTER_WIDTH    : f64 = 1.75;
/// Stroke width at the middle of an angle bracket
pub const ANGLE_CENTER_WIDTH    : f64 = 1.55;
/// Vertical bars (`|`, `\|`) are drawn thinner than the other braces
pub const ABSNORM_LINE_FACTOR   : f64 = 0.75;
/// A brace growing taller than this factor times the font height also grows wider (with the square root of the excess)
pub const BRACE_OVERSIZE_FACTOR : f64 = 1.2;

// The curly brace path (see `render::shapes::hbrace_path`)
/// Fraction of the brace height spent in the rounded ends
pub const HBRACE_CUBIC_SHRINK         : f64 = 0.5;
/// Distance of the Bézier control points, as a fraction of the brace height
pub const HBRACE_CUBIC_CONTROL_FACTOR : f64 = 0.3;
/// Width of the thin parts of the brace, in line widths
pub const HBRACE_THIN_LINE            : f64 = 0.5;
/// Width of the thick parts of the brace, in line widths
pub const HBRACE_THICK_LINE           : f64 = 2.0;

/// Length of the bar drawn through `\hbar`-like symbols, as a fraction of the width of "x"
pub const BAR_WIDTH_FACTOR : f64 = 1.0 / 3.0;
