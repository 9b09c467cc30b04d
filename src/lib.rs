//! A LESS to CSS compiler.
//!
//! lesscss can be used as both a CLI and a library.
//!
//! ```
//! use lesscss::{CompileOptions, LessCompiler};
//!
//! let compiler = LessCompiler::new(CompileOptions {
//!     compress: true,
//!     ..Default::default()
//! });
//!
//! let css = compiler
//!     .compile("@c: #ff0000; .a { color: @c; }", "style.less")
//!     .unwrap();
//!
//! assert_eq!(css, ".a{color:#f00}");
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod compile;
pub mod config;
pub mod less;
pub mod util;

pub use compile::{compile, CompileError, CompileOptions, LessCompiler};
pub use config::Config;
