//! Unified error types for the domain layer
//!
//! Provides a common error type for string-to-type conversions and data
//! validation, so adapters do not have to fall back to `String` errors.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects and closed enumerations)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with key {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },
}

impl DomainError {
    /// Creates a validation error for data that violates a domain invariant.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Source name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant:
    ///
    /// ```ignore
    /// impl FromStr for Attribute {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "strength" => Ok(Self::Strength),
    ///             _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_include_context() {
        assert_eq!(
            DomainError::not_found("race", "elf").to_string(),
            "Entity not found: race with key elf"
        );
        assert_eq!(
            DomainError::parse("Unknown feature type: aura").to_string(),
            "Parse error: Unknown feature type: aura"
        );
    }
}
