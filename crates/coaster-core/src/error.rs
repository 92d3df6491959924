//! Error types for Coaster

use thiserror::Error;

/// The main error type for Coaster operations
#[derive(Debug, Error)]
pub enum CoasterError {
    #[error("Path parameter {value} outside of [{min}, {max})")]
    ParameterOutOfDomain { value: f32, min: f32, max: f32 },

    #[error("Degenerate frame: {0}")]
    DegenerateFrame(String),

    #[error("Control point set needs at least {required} points, got {count}")]
    TooFewControlPoints { count: usize, required: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

/// Result type alias for Coaster operations
pub type Result<T> = std::result::Result<T, CoasterError>;

impl From<toml::de::Error> for CoasterError {
    fn from(err: toml::de::Error) -> Self {
        CoasterError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CoasterError {
    fn from(err: toml::ser::Error) -> Self {
        CoasterError::TomlSerError(err.to_string())
    }
}
