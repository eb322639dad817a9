use thiserror::Error;

/// Errors raised by the profile store backends.
///
/// `Backend` covers anything the underlying key-value service reports
/// (connection refused, protocol error); `Malformed` is a stored value that
/// does not decode into a profile object.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Redis connection or command errors
    #[error("Store backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Stored value is not a JSON object
    #[error("Malformed profile for '{identity}': {reason}")]
    Malformed { identity: String, reason: String },

    /// Profile could not be serialized for writing
    #[error("Profile serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Fixture file could not be read
    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// Errors raised by the outbound HTTP fetchers (Last.fm, affiliation API).
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not JSON
    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Centralized error type for the application
///
/// Script code works with the narrower `StoreError` / `FetchError`; this enum
/// is what setup code (config, store construction) hands back to the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::Store(StoreError::Backend(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::Http(err))
    }
}
