/// Error types for the uadetect library
use std::fmt;

/// Result type alias for data store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dataset parsing and store operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dataset is structurally invalid at a call boundary: empty dataset,
    /// missing version, duplicate entry ids
    InvalidData(String),

    /// The supplied bytes do not parse into a valid dataset
    Format(String),

    /// I/O errors while reading a dataset or fixture stream
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Error::Format(msg) => write!(f, "Format error: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
