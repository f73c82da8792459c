//! # Error Types
//!
//! Domain-specific error types for curio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  curio-core errors (this file)                                         │
//! │  ├── CoreError        - Store operation failures (NotFound)            │
//! │  └── ValidationError  - Payload rejected at the form boundary          │
//! │                                                                         │
//! │  curio-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, wraps CoreError              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → UI                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A declined delete confirmation is NOT an error; see
//! [`DeleteOutcome`](crate::confirm::DeleteOutcome).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Item store errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with the given id exists.
    ///
    /// ## When This Occurs
    /// - Updating an item that was deleted in the meantime
    /// - Duplicating a stale id held by the UI
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before a payload ever reaches the item store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid date, bad amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., an id already in the store).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Collection holds more entries than allowed.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
}

impl ValidationError {
    /// Builds a `NotAllowed` error from any list of labels.
    pub fn not_allowed<I, S>(field: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Item not found: abc");

        let err = ValidationError::TooMany {
            field: "tags".to_string(),
            max: 6,
        };
        assert_eq!(err.to_string(), "tags cannot have more than 6 entries");
    }

    #[test]
    fn test_not_allowed_lists_labels() {
        let err = ValidationError::not_allowed("status", ["Owned", "Sold"]);
        assert_eq!(err.to_string(), r#"status must be one of: ["Owned", "Sold"]"#);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
