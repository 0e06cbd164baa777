use std::fmt;

/// Errors surfaced by the session engine and the terminal host.
#[derive(Debug)]
pub enum Error {
    /// Rejected configuration, e.g. a zero challenge length.
    InvalidConfig(String),
    /// An embedded word bank is missing, malformed or empty.
    WordBank { name: String, reason: String },
    /// Terminal I/O failure in the host.
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::WordBank { name, reason } => write!(f, "word bank '{name}': {reason}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
