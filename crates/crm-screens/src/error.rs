//! Error types for the screens crate.

use thiserror::Error;

use crate::entities::EntityKind;

/// Errors raised while decoding records, loading configuration, or opening
/// a screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The fetch response body could not be decoded.
    #[error("failed to decode records: {0}")]
    Decode(#[from] serde_json::Error),

    /// The YAML configuration could not be parsed.
    #[error("invalid screen configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A query parameter was rejected by the engine.
    #[error(transparent)]
    Seeker(#[from] crm_seeker::SeekerError),

    /// No screen with this name is configured.
    #[error("unknown screen '{0}'")]
    UnknownScreen(String),

    /// The screen shows a different entity than the one requested.
    #[error("screen '{screen}' shows {actual} records, not {expected}")]
    EntityMismatch {
        screen: String,
        expected: EntityKind,
        actual: EntityKind,
    },

    /// The configured sort field does not exist on the entity.
    #[error("screen '{screen}' sorts by unknown field '{field}'")]
    UnknownSortField { screen: String, field: String },

    /// The configured page size is zero.
    #[error("screen '{screen}' has a page size of zero")]
    InvalidPageSize { screen: String },

    /// Configuration file extension is not one we read.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for screen operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
