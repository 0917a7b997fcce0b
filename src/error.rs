//! Error types for the PDF generation core.
//!
//! This module defines all error types that can occur while building PDF
//! objects, tracking font usage, resolving tables and writing documents.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF generation.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Key already present in an ordered tree
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation requires at least one element
    #[error("Container is empty")]
    EmptyContainer,

    /// Operation not valid in the current state (e.g. cursor not positioned)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Font loading or serialization error
    #[error("Font error: {0}")]
    Font(String),

    /// Table layout error
    #[error("Table error: {0}")]
    Table(String),

    /// Hyphenation pattern error
    #[error("Hyphenation error: {0}")]
    Hyphenation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
