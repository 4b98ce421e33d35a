//! # Error Types
//!
//! Domain-specific error types for veggie-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  veggie-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  veggie-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in apps/server)                                           │
//! │  └── ApiError         - What HTTP clients see                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (vegetable name, stock level, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations inside bill creation.
/// Each one aborts the enclosing transaction; the database is left unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A bill line referenced a vegetable the shop has never stocked.
    ///
    /// ## When This Occurs
    /// - No inventory row exists for (user, vegetable_id)
    /// - The vegetable id does not exist at all
    #[error("Vegetable ID {vegetable_id} not in inventory")]
    InvalidItem { vegetable_id: i64 },

    /// Insufficient stock to complete a bill line.
    ///
    /// Carries the vegetable's display name and the current stock level so
    /// the operator sees exactly what can still be sold.
    #[error("Insufficient stock for {name}: available {available_grams} g, requested {requested_grams} g")]
    InsufficientStock {
        name: String,
        available_grams: i64,
        requested_grams: i64,
    },

    /// Bill not found, or not owned by the caller (indistinguishable).
    #[error("Bill not found: {0}")]
    BillNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed mobile number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Collection has too many entries.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
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
    fn test_insufficient_stock_message_carries_detail() {
        let err = CoreError::InsufficientStock {
            name: "Tomato".to_string(),
            available_grams: 45_000,
            requested_grams: 50_000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Tomato: available 45000 g, requested 50000 g"
        );
    }

    #[test]
    fn test_invalid_item_message() {
        let err = CoreError::InvalidItem { vegetable_id: 42 };
        assert_eq!(err.to_string(), "Vegetable ID 42 not in inventory");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::InvalidFormat {
            field: "mobile_number".to_string(),
            reason: "must be 10-15 digits".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mobile_number has invalid format: must be 10-15 digits"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "qty_grams".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
