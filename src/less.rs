//! LESS engine.
//!
//! Compilation happens in two steps: a [`Parser`] reads the source and its
//! imports into a [`Stylesheet`], which is then evaluated and printed by
//! [`Stylesheet::to_css`].
//!
//! ```
//! use lesscss::less::{Parser, ParserOptions, RenderOptions};
//!
//! let parser = Parser::new(ParserOptions::default());
//! let stylesheet = parser.parse("@w: 2px; .a { width: @w * 2; }").unwrap();
//! let css = stylesheet.to_css(&RenderOptions::default()).unwrap();
//!
//! assert_eq!(css, ".a {\n  width: 4px;\n}\n");
//! ```

mod ast;
mod color;
mod error;
mod eval;
mod functions;
mod import;
mod parser;
mod render;
mod tokens;
mod value;

use std::path::{Path, PathBuf};

use log::debug;

pub use self::error::{Error, ErrorKind, Location, Result};
use self::{ast::Node, import::Importer, render::Renderer};
use crate::util::minify::minify_css;

/// Default optimization level.
pub const DEFAULT_OPTIMIZATION: u8 = 1;

/// Options of a [`Parser`].
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Directories searched for imported files.
    pub search_paths: Vec<PathBuf>,
    /// Optimization level.
    pub optimization: u8,
    /// File name of the source, used to resolve relative imports and to
    /// report errors.
    pub filename: Option<PathBuf>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            optimization: DEFAULT_OPTIMIZATION,
            filename: None,
        }
    }
}

impl ParserOptions {
    /// Add a directory to the search paths.
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Add directories to the search paths.
    pub fn search_paths<P>(mut self, paths: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<PathBuf>,
    {
        self.search_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the optimization level.
    pub fn optimization(mut self, level: u8) -> Self {
        self.optimization = level;
        self
    }

    /// Set the file name of the source.
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// LESS parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser.
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse LESS source text, resolving its imports.
    pub fn parse(&self, input: impl AsRef<str>) -> Result<Stylesheet> {
        let filename = self.options.filename.as_deref();

        debug!("Parsing {}", filename.map_or("<input>".into(), Path::to_string_lossy));

        let nodes = parser::parse(input.as_ref(), filename)?;
        let nodes = Importer::new(&self.options.search_paths).expand_root(nodes, filename)?;

        Ok(Stylesheet {
            nodes,
            optimization: self.options.optimization,
        })
    }

    /// Parse LESS source text and pass the result to `callback`.
    ///
    /// The callback is called exactly once, before this function returns,
    /// and its return value is returned.
    pub fn parse_with<F, T>(&self, input: impl AsRef<str>, callback: F) -> T
    where
        F: FnOnce(Result<Stylesheet>) -> T,
    {
        callback(self.parse(input))
    }
}

/// Options of [`Stylesheet::to_css`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Remove whitespace and comments.
    pub compress: bool,
    /// Minify the output with a CSS minifier.
    pub yuicompress: bool,
}

/// Parsed stylesheet, with imports resolved.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: Vec<Node>,
    optimization: u8,
}

impl Stylesheet {
    /// Evaluate the stylesheet and print it as CSS.
    pub fn to_css(&self, options: &RenderOptions) -> Result<String> {
        let rules = eval::evaluate(&self.nodes)?;

        let compress = options.compress || options.yuicompress;
        let css = Renderer::new(compress, self.optimization).render(&rules);

        if !options.yuicompress {
            return Ok(css);
        }

        minify_css(&css).map_err(|error| Error::new(ErrorKind::Minify, error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::{ErrorKind, Parser, ParserOptions, RenderOptions};

    const INPUT: &str = concat!(
        "@import \"colors\";\n",
        "// line comment\n",
        ".button {\n",
        "  color: @primary;\n",
        "  &:hover { color: darken(@primary, 10%); }\n",
        "}\n",
    );

    #[test]
    fn parse_and_render() -> Result<(), Box<dyn std::error::Error>> {
        let dir = assert_fs::TempDir::new()?;
        dir.child("colors.less").write_str("@primary: #ff0000;")?;

        let parser = Parser::new(ParserOptions::default().search_path(dir.path()));
        let stylesheet = parser.parse(INPUT)?;

        assert_eq!(
            stylesheet.to_css(&RenderOptions::default())?,
            concat!(
                ".button {\n",
                "  color: #ff0000;\n",
                "}\n",
                ".button:hover {\n",
                "  color: #cc0000;\n",
                "}\n",
            )
        );

        let compressed = stylesheet.to_css(&RenderOptions {
            compress: true,
            yuicompress: false,
        })?;
        assert_eq!(compressed, ".button{color:#f00}.button:hover{color:#c00}");

        Ok(())
    }

    #[test]
    fn yuicompress() -> Result<(), Box<dyn std::error::Error>> {
        let stylesheet = Parser::default().parse(".a { margin: 0px 0px; color: #ff0000; }")?;

        let css = stylesheet.to_css(&RenderOptions {
            compress: false,
            yuicompress: true,
        })?;

        assert!(!css.contains('\n'));
        assert!(css.starts_with(".a{"));
        assert!(css.len() <= ".a{margin:0px 0px;color:red}".len());

        Ok(())
    }

    #[test]
    fn parse_with_callback() {
        let parser = Parser::default();

        let result = parser.parse_with(".a { color: red; ", |result| result.map(|_| ()));
        let error = result.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn render_error_after_parse() {
        let stylesheet = Parser::default().parse(".a { color: @missing; }").unwrap();

        let error = stylesheet.to_css(&RenderOptions::default()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Name);
        assert_eq!(
            error.to_string(),
            "NameError: variable @missing is undefined on line 1, column 6"
        );
    }

    #[test]
    fn error_location_has_filename() {
        let parser = Parser::new(ParserOptions::default().filename("style.less"));

        let error = parser.parse("\n\n.a {").unwrap_err();

        let location = error.location().unwrap();
        assert_eq!(location.filename.as_deref(), Some(std::path::Path::new("style.less")));
        assert_eq!(location.line, 3);
    }
}
