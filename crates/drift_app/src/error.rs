//! Error types for the Drift application layer

use thiserror::Error;

/// Configuration problems, caught before anything touches the page
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid speed range: min_speed {min} must be positive and not exceed max_speed {max}")]
    SpeedRange { min: f32, max: f32 },

    #[error("follow_ease must be in (0, 1], got {0}")]
    FollowEase(f32),

    #[error("{name} threshold must be in [0, 1], got {value}")]
    Threshold { name: &'static str, value: f32 },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Drift application errors
#[derive(Error, Debug)]
pub enum DriftError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(#[from] drift_platform::PlatformError),
}

/// Result type for Drift operations
pub type Result<T> = std::result::Result<T, DriftError>;
