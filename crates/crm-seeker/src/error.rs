//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when building query parameters or schemas.
///
/// Executing a query never fails: every pipeline stage is total. Errors only
/// surface at construction boundaries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeekerError {
    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Page numbers are 1-based.
    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(usize),

    /// A schema field declaration is empty.
    #[error("schema '{schema}' declares an empty {role} field")]
    EmptyField {
        schema: String,
        role: &'static str,
    },

    /// The classifier needs a status field the schema does not declare.
    #[error("schema '{schema}' uses the {classifier} classifier without a status field")]
    MissingStatusField {
        schema: String,
        classifier: &'static str,
    },
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
