//! Utility functions.

pub mod minify;
pub(crate) mod toml;
