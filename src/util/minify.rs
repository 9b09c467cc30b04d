//! Minify CSS code.
//!
//! This module uses [`lightningcss`] under the hood.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use thiserror::Error;

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum MinifyCssError {
    /// The CSS could not be parsed.
    #[error("parsing CSS: {0}")]
    Parse(String),
    /// The minifier failed.
    #[error("minifying CSS: {0}")]
    Minify(String),
    /// The minified CSS could not be printed.
    #[error("printing CSS: {0}")]
    Print(String),
}

/// Minify a CSS string.
///
/// Rules are merged and values shortened where lightningcss can prove it is
/// safe, on top of removing whitespace.
pub fn minify_css(input: impl AsRef<str>) -> Result<String, MinifyCssError> {
    let mut style_sheet = StyleSheet::parse(input.as_ref(), ParserOptions::default())
        .map_err(|error| MinifyCssError::Parse(error.to_string()))?;

    style_sheet
        .minify(MinifyOptions::default())
        .map_err(|error| MinifyCssError::Minify(error.to_string()))?;

    let result = style_sheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|error| MinifyCssError::Print(error.to_string()))?;

    Ok(result.code)
}
