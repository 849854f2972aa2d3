//! Error types for subsync-core

/// Result type alias for subsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for subsync operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-success HTTP status from the hosting API
    #[error("Transport error: {0}")]
    Transport(String),

    /// API rate limit exceeded (a transport failure with a known cause)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// API entry missing a field required to correlate it
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Assignment missing its organization or repository
    #[error("Input configuration error: {0}")]
    InputConfiguration(String),

    /// Invalid process configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON/YAML encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Runtime error (Tokio, semaphores, etc.)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest messages carry the URL, never headers
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(format!("YAML error: {}", err))
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Transport error
    Transport,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Malformed API entry
    MalformedRecord,
    /// Assignment input error
    InputConfiguration,
    /// Configuration error
    Config,
    /// I/O operation error
    Io,
    /// Serialization error
    Serialization,
    /// Runtime error
    Runtime,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind, zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::MalformedRecord(_) => ErrorKind::MalformedRecord,
            Error::InputConfiguration(_) => ErrorKind::InputConfiguration,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Borrow the error message, zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Transport(msg)
            | Error::RateLimitExceeded(msg)
            | Error::MalformedRecord(msg)
            | Error::InputConfiguration(msg)
            | Error::Config(msg)
            | Error::Serialization(msg)
            | Error::Runtime(msg)
            | Error::Other(msg) => msg,
            Error::Io(_) => "I/O error",
        }
    }

    /// True for failures that come from talking to the hosting API.
    ///
    /// These abort the assignment being processed.
    #[inline]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::RateLimitExceeded)
    }

    /// True for entries that should be skipped rather than propagated.
    #[inline]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedRecord)
    }
}
