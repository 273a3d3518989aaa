//! Error types for yason.

use std::fmt;

use yason_parse::ParseError;

/// Error type for yason operations.
#[derive(Debug)]
pub enum Error {
    /// The document is not valid yason.
    Parse(ParseError),
    /// The document is valid but does not fit the requested type.
    Data(serde_json::Error),
}

impl Error {
    /// The parse error, if the document itself was invalid.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Data(_) => None,
        }
    }

    /// Render this error with source context.
    ///
    /// Parse errors get a labelled source excerpt; data errors only have a message.
    pub fn render(&self, filename: &str, source: &str) -> String {
        match self {
            Error::Parse(e) => e.render(filename, source),
            Error::Data(e) => format!("{filename}: {e}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => fmt::Display::fmt(e, f),
            Error::Data(e) => write!(f, "invalid data: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Data(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Data(e)
    }
}

/// Result type for yason operations.
pub type Result<T> = std::result::Result<T, Error>;
