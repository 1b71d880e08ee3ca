//! Parsers for CSS-like values: colors and linear gradients.
//!
//! Both share the [`CssTokenizer`], which scans the input lazily: the parsers look one token ahead with
//! [`CssTokenizer::peek_next_token`] and commit with [`CssTokenizer::get_token`].
//! Malformed input is reported as a [`CssError`](crate::error::CssError).
//!
//! ```
//! use mathtext::css::{parse_color, color_to_string, Rgba};
//!
//! let c = parse_color("rgb(100% 0 50% / 10%)").unwrap();
//! assert_eq!(c, Rgba::new(255, 0, 128, 26));
//! assert_eq!(parse_color(&color_to_string(c)), Ok(c));
//! ```

pub mod lexer;
pub mod named;
mod color;
mod gradient;

pub use self::color::{color_to_string, parse_color, Rgba};
pub use self::gradient::{parse_linear_gradient, GradientStop, LinearGradient};
pub use self::lexer::{read_number_with_unit, CssTokenizer, NumberWithUnit, Token, TokenType};
