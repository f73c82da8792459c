//! # Validation Module
//!
//! Field validation for item payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  ├── Closed enums (status, type, rarity, ...)                          │
//! │  └── Tags (≤ 6 entries, checked on push and on load)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form boundary (ItemForm::into_payload)                       │
//! │  └── THIS MODULE: names, dates, amounts, counts                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Item store                                                   │
//! │  └── id uniqueness                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use curio_core::validation::{validate_item_name, validate_acquired_date};
//!
//! assert!(validate_item_name("Labubu The Monsters").is_ok());
//! assert!(validate_acquired_date("2024-06-01").is_ok());
//! assert!(validate_acquired_date("June 1st").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name, brand or series.
pub const MAX_NAME_LEN: usize = 200;

/// Largest accepted quantity or set size.
pub const MAX_COUNT: i64 = 9_999;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (drafts skip this check)
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_text_length("name", name)
}

/// Validates the length of an optional short text field (brand, series).
pub fn validate_text_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an acquired date.
///
/// ## Rules
/// - Empty is allowed (sorts as the epoch)
/// - Otherwise must be a calendar date in `YYYY-MM-DD` form
pub fn validate_acquired_date(date: &str) -> ValidationResult<()> {
    let date = date.trim();

    if date.is_empty() {
        return Ok(());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "acquired date".to_string(),
        reason: "must be a date like 2024-06-01".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or value in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed
///
/// ## Example
/// ```rust
/// use curio_core::validation::validate_amount;
///
/// assert!(validate_amount("purchase price", 1099).is_ok());
/// assert!(validate_amount("purchase price", 0).is_ok());
/// assert!(validate_amount("purchase price", -100).is_err());
/// ```
pub fn validate_amount(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a count such as quantity or boxes in a set.
///
/// ## Rules
/// - Between 0 and [`MAX_COUNT`]
pub fn validate_count(field: &str, count: i64) -> ValidationResult<()> {
    if !(0..=MAX_COUNT).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_COUNT,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use curio_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Labubu").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_acquired_date() {
        assert!(validate_acquired_date("").is_ok());
        assert!(validate_acquired_date("2023-01-01").is_ok());
        assert!(validate_acquired_date("2023-02-30").is_err());
        assert!(validate_acquired_date("01/02/2023").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", 0).is_ok());
        assert!(validate_amount("price", 1099).is_ok());
        assert!(validate_amount("price", -1).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count("quantity", 0).is_ok());
        assert!(validate_count("quantity", 9_999).is_ok());
        assert!(validate_count("quantity", -1).is_err());
        assert!(validate_count("quantity", 10_000).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
