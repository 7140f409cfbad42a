//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to initialize platform
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// A host global (window, document) is missing
    #[error("Platform not available: {0}")]
    Unavailable(String),

    /// Platform not supported on this target
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// A DOM call was rejected by the host
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
