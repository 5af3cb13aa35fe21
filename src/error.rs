//! Error types for the depiction renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or rendering a depiction
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or has the wrong semantic type.
    ///
    /// Scoped to the single view under construction; the registry boundary
    /// catches it, logs it, and drops that node only.
    #[error("expected {expected} for field `{field}`, got {found}")]
    Validation {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A stack declared an orientation that is neither portrait nor landscape
    #[error("invalid orientation value: {0}")]
    InvalidOrientation(String),

    /// A composite view required a child that could not be constructed
    #[error("invalid child view: {0}")]
    InvalidChild(String),

    /// Markdown conversion failed during a node's make phase
    #[error("markdown rendering failed: {0}")]
    Markdown(String),

    /// The document has neither `views` nor `tabs` - nothing to render.
    ///
    /// This is the only error that aborts document-level construction.
    #[error("depiction has no `views` or `tabs` to render")]
    EmptyDepiction,
}

impl Error {
    /// Shorthand for a field validation failure
    pub fn validation(field: &str, expected: &'static str, found: &'static str) -> Self {
        Error::Validation {
            field: field.to_string(),
            expected,
            found,
        }
    }
}
