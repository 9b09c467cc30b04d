//! Compile LESS code to CSS.
//!
//! This module wraps the [`less`](crate::less) engine: the source is parsed,
//! then the parse tree is rendered, and failures are tagged with the stage
//! that raised them.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::less::{self, Parser, ParserOptions, RenderOptions, DEFAULT_OPTIMIZATION};

/// List of errors for this module.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The source could not be parsed, or an import could not be resolved.
    #[error("failed to parse LESS code")]
    Parse(#[source] less::Error),
    /// The parse tree could not be rendered.
    #[error("failed to render CSS")]
    Render(#[source] less::Error),
    /// The source file could not be read.
    #[error("failed to read {path:?}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl CompileError {
    /// Return the error raised by the LESS engine, if any.
    pub fn less_error(&self) -> Option<&less::Error> {
        match self {
            Self::Parse(error) | Self::Render(error) => Some(error),
            Self::Read { .. } => None,
        }
    }
}

/// Options of the LESS compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Directories searched for imported files.
    pub include_paths: Vec<PathBuf>,
    /// Remove whitespace and comments from the output.
    pub compress: bool,
    /// Minify the output with a CSS minifier.
    pub yuicompress: bool,
    /// Optimization level of the parser.
    pub optimization: u8,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include_paths: Vec::new(),
            compress: false,
            yuicompress: false,
            optimization: DEFAULT_OPTIMIZATION,
        }
    }
}

/// Compile a LESS string to CSS.
///
/// `filename` is used to resolve relative imports and to report errors.
pub fn compile(
    source: impl AsRef<str>,
    filename: impl AsRef<Path>,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let parser_options = ParserOptions::default()
        .search_paths(options.include_paths.iter().cloned())
        .optimization(options.optimization)
        .filename(filename.as_ref());

    let render_options = RenderOptions {
        compress: options.compress,
        yuicompress: options.yuicompress,
    };

    Parser::new(parser_options).parse_with(source, |result| -> Result<String, CompileError> {
        let stylesheet = result.map_err(CompileError::Parse)?;
        stylesheet
            .to_css(&render_options)
            .map_err(CompileError::Render)
    })
}

/// LESS compiler.
///
/// The compiler keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct LessCompiler {
    options: CompileOptions,
}

impl LessCompiler {
    /// Create a LESS compiler.
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Return the options of this compiler.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a LESS string to CSS.
    pub fn compile(
        &self,
        source: impl AsRef<str>,
        filename: impl AsRef<Path>,
    ) -> Result<String, CompileError> {
        compile(source, filename, &self.options)
    }

    /// Compile a LESS file to CSS.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<String, CompileError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.compile(source, path)
    }
}
