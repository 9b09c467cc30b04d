//! Errors raised while parsing or rendering LESS code.

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source text.
    Syntax,
    /// Reference to an undefined variable or mixin.
    Name,
    /// Arguments that match no mixin or function signature.
    Argument,
    /// Arithmetic on incompatible operands.
    Operation,
    /// Import that cannot be found or read.
    File,
    /// Failure of the CSS minifier.
    Minify,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "Syntax",
            Self::Name => "Name",
            Self::Argument => "Argument",
            Self::Operation => "Operation",
            Self::File => "File",
            Self::Minify => "Minify",
        };
        f.write_str(name)
    }
}

/// Position in a source file.
///
/// Lines and columns start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Source file, if the input was read from one.
    pub filename: Option<PathBuf>,
    /// Line number.
    pub line: usize,
    /// Column number, counted in characters.
    pub column: usize,
}

impl Location {
    /// Compute the location of a byte offset in `input`.
    pub(crate) fn from_offset(input: &str, offset: usize, filename: Option<&Path>) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            filename: filename.map(Path::to_path_buf),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filename) = self.filename.as_ref() {
            write!(f, "in {} ", filename.display())?;
        }
        write!(f, "on line {}, column {}", self.line, self.column)
    }
}

/// An error raised by the LESS engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    location: Option<Location>,
}

impl Error {
    /// Create an error without location.
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Attach a location, unless one is already set.
    pub(crate) fn at(self, location: &Location) -> Self {
        Self {
            location: self.location.or_else(|| Some(location.clone())),
            ..self
        }
    }

    /// Return the error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the error message, without location.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return where the error occurred, when known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Error: {}", self.kind, self.message)?;
        if let Some(location) = self.location.as_ref() {
            write!(f, " {location}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Result type of the LESS engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Error, ErrorKind, Location};

    #[test]
    fn location_from_offset() {
        const INPUT: &str = "a {\n  b: c;\n}";

        let location = Location::from_offset(INPUT, 6, Some(Path::new("x.less")));

        assert_eq!(location.line, 2);
        assert_eq!(location.column, 3);
        assert_eq!(location.to_string(), "in x.less on line 2, column 3");
    }

    #[test]
    fn display() {
        let location = Location {
            filename: None,
            line: 4,
            column: 1,
        };

        let error = Error::new(ErrorKind::Name, "variable @x is undefined").at(&location);

        assert_eq!(
            error.to_string(),
            "NameError: variable @x is undefined on line 4, column 1"
        );
    }
}
