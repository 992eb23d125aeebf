//! Unified error types for the domain layer
//!
//! Value objects validate on construction and report failures through
//! [`DomainError`], so adapters never pass raw strings around.

use thiserror::Error;

use crate::value_objects::ComparisonParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if nickname.len() > MAX_NICKNAME_LEN {
    ///     return Err(DomainError::validation("That nickname is too long."));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<ComparisonParseError> for DomainError {
    fn from(err: ComparisonParseError) -> Self {
        Self::Parse(err.to_string())
    }
}
