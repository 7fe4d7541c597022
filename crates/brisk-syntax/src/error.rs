//! Error type shared by the lexer, parser, and interpreter.

use std::fmt;

/// An error raised while processing brisk source, with an optional
/// source position. Parser errors carry a line and column; runtime
/// errors usually know only the statement line.
#[derive(Debug, Clone)]
pub struct Error {
    pub msg: String,
    pub line: Option<usize>,
    pub col: Option<usize>,
}

impl Error {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// An error pinned to an exact source position.
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    /// An error known only down to a source line.
    pub fn on_line(msg: impl Into<String>, line: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.col) {
            (Some(l), Some(c)) => write!(f, "{} at {}:{}", self.msg, l, c),
            (Some(l), None) => write!(f, "{} on line {}", self.msg, l),
            _ => write!(f, "{}", self.msg),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Shorthand for `Err(Error::with_span(msg, line, col))`.
pub fn error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, line, col))
}
