//! Error types for cloudphoto-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for cloudphoto-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cloudphoto-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file unreadable or incomplete
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local path missing or not a directory
    #[error("No such path or path is not a directory: {0}")]
    InvalidPath(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// INI parsing error
    #[error("INI parse error: {0}")]
    Ini(#[from] ini::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or storage service error
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    ///
    /// An invalid local path is reported to the user but does not fail the process.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) => 0,                                // Success
            Error::Config(_) | Error::InvalidUrl(_) | Error::Ini(_) => 78, // ConfigError
            Error::Network(_) => 3,                                    // NetworkError
            Error::Auth(_) => 4,                                       // AuthError
            Error::NotFound(_) => 5,                                   // NotFound
            _ => 1,                                                    // GeneralError
        }
    }
}
