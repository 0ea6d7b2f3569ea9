use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning command line arguments into a query.
///
/// All of these are reported before any record is read.
#[derive(Debug)]
pub enum Error {
    /// An argument did not resolve to exactly one of the known candidates
    InvalidArgument {
        option: String,
        value: String,
        candidates: Vec<String>,
    },

    /// A `--regex` argument failed to compile
    InvalidRegex { option: String, source: regex::Error },
}

impl Error {
    pub(crate) fn invalid_argument(
        option: &str,
        value: &str,
        candidates: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Error::InvalidArgument {
            option: option.to_string(),
            value: value.to_string(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument {
                option,
                value,
                candidates,
            } => write!(
                f,
                "no such --{} argument: {}.  (Possible arguments: {})",
                option,
                value,
                candidates.join(", ")
            ),
            Error::InvalidRegex { option, source } => {
                write!(f, "invalid regular expression for --{}: {}", option, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidRegex { source, .. } => Some(source),
            Error::InvalidArgument { .. } => None,
        }
    }
}
