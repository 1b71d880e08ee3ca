/// Metrics read from OpenType/TrueType files with the `ttf-parser` crate.
#[cfg(feature="ttfparser-fontparser")]
pub mod ttf_parser;
