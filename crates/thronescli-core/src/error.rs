use std::fmt;

/// Result type for thronescli-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding or decoding failed
    Json(serde_json::Error),

    /// Download of the card database failed
    Http(reqwest::Error),

    /// Configuration error
    Config(String),

    /// The card database could not be refreshed; the previous copy is kept
    Refresh(Box<Error>),

    /// A line of the card database is not a JSON object
    Parse { line: usize, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Refresh(err) => write!(f, "Failed to update card database: {}", err),
            Error::Parse { line, message } => {
                write!(f, "Bad card database entry on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Http(err) => Some(err),
            Error::Refresh(err) => Some(err.as_ref()),
            Error::Config(_) | Error::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
