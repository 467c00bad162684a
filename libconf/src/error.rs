//! Error types for configuration loading.

use std::io;
use thiserror::Error;

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Parse context carrying the source filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: String,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.unwrap_or_default().to_string(),
        }
    }

    /// Build a positional error at a 1-based line and column.
    pub fn at(&self, reason: Reason, line: usize, column: usize) -> LoadError {
        LoadError::Syntax {
            filename: self.filename.clone(),
            line,
            column,
            reason,
        }
    }

    /// Build a non-positional error wrapping an I/O failure.
    pub fn io(&self, reason: Reason, source: io::Error) -> LoadError {
        LoadError::Io {
            filename: self.filename.clone(),
            reason,
            source,
        }
    }
}

/// The grammatical expectation that failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The source file could not be opened.
    #[error("Open file failed")]
    OpenFailed,

    /// The source stream could not be read to the end.
    #[error("Read stream failed")]
    ReadFailed,

    /// Newline or end of input inside a quoted token.
    #[error("End of quote")]
    EndOfQuote,

    /// Section header not closed, or mismatched `]` count.
    #[error("End of section")]
    EndOfSection,

    /// Multi-level section deeper than the open sections allow.
    #[error("Section without parent")]
    SectionWithoutParent,

    /// Assignment operator found where a key was expected.
    #[error("Key not found")]
    KeyNotFound,

    /// Neither `=` nor `:` after a key.
    #[error("Assign operator not found")]
    AssignNotFound,

    /// Key table suffix not closed.
    #[error("End of map")]
    EndOfMap,

    /// Extra content after a quoted value.
    #[error("End of value")]
    EndOfValue,

    /// Newline or end of input inside an inline object key.
    #[error("End of key")]
    EndOfKey,

    /// Inline object not closed.
    #[error("End of object")]
    EndOfObject,

    /// Inline array not closed.
    #[error("End of array")]
    EndOfArray,

    /// Containers nested past [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("Nesting too deep")]
    TooDeep,
}

/// Error returned by every `load_*` entry point.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened or read. Carries no position.
    #[error("Parse {}({})", file_prefix(.filename, ": "), .reason)]
    Io {
        filename: String,
        reason: Reason,
        #[source]
        source: io::Error,
    },

    /// Malformed input at a 1-based line and column.
    #[error("Parse at {}{}:{} ({})", file_prefix(.filename, ":"), .line, .column, .reason)]
    Syntax {
        filename: String,
        line: usize,
        column: usize,
        reason: Reason,
    },
}

fn file_prefix(filename: &str, separator: &str) -> String {
    if filename.is_empty() {
        String::new()
    } else {
        format!("{}{}", filename, separator)
    }
}

impl LoadError {
    /// Name of the source file, empty for string, stream and byte sources.
    pub fn filename(&self) -> &str {
        match self {
            LoadError::Io { filename, .. } | LoadError::Syntax { filename, .. } => filename,
        }
    }

    /// Which expectation failed.
    pub fn reason(&self) -> Reason {
        match self {
            LoadError::Io { reason, .. } | LoadError::Syntax { reason, .. } => *reason,
        }
    }

    /// Short human-readable message, without position.
    pub fn message(&self) -> String {
        self.reason().to_string()
    }

    /// 1-based line, or 0 when the error is not positional.
    pub fn line(&self) -> usize {
        match self {
            LoadError::Io { .. } => 0,
            LoadError::Syntax { line, .. } => *line,
        }
    }

    /// 1-based column in bytes, or 0 when the error is not positional.
    pub fn column(&self) -> usize {
        match self {
            LoadError::Io { .. } => 0,
            LoadError::Syntax { column, .. } => *column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_display() {
        let ctx = ParseContext::new(None);
        let err = ctx.at(Reason::EndOfSection, 1, 6);
        assert_eq!(err.to_string(), "Parse at 1:6 (End of section)");

        let ctx = ParseContext::new(Some("app.conf"));
        let err = ctx.at(Reason::KeyNotFound, 2, 1);
        assert_eq!(err.to_string(), "Parse at app.conf:2:1 (Key not found)");
    }

    #[test]
    fn test_io_display() {
        let ctx = ParseContext::new(Some("/nope.conf"));
        let err = ctx.io(
            Reason::OpenFailed,
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "Parse /nope.conf: (Open file failed)");
        assert_eq!(err.line(), 0);
        assert_eq!(err.column(), 0);
        assert_eq!(err.message(), "Open file failed");
    }
}
