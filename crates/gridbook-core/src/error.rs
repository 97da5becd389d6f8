//! Error types for gridbook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridbook-core
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed textual cell reference or out-of-range coordinate
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Malformed cell range
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Operation targets a sheet name that does not exist
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Named style collision while the registry is in strict mode
    #[error("Named style already defined: {0}")]
    DuplicateStyleRedefinition(String),

    /// Reference to a named style that is not in the registry
    #[error("Named style not found: {0}")]
    StyleNotFound(String),

    /// Structural failure while loading a persisted document
    #[error("Document is corrupt: {0}")]
    DocumentCorrupt(String),

    /// Conditional format rule kind not recognized
    #[error("Unsupported conditional format rule kind: {0}")]
    UnsupportedRuleKind(String),

    /// Conditional format rule is missing a required parameter
    #[error("Invalid conditional format parameters: {0}")]
    InvalidRuleParameters(String),

    /// Out-of-domain number, such as a negative or non-finite column width
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Merged cell conflict
    #[error("Range {0} overlaps an existing merged region")]
    MergedCellConflict(String),

    /// IO error at the file boundary
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a corrupt-document error with a message
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Error::DocumentCorrupt(msg.into())
    }
}
