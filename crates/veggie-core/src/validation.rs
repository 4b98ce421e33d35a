//! # Validation Module
//!
//! Input validation rules, applied by the HTTP layer before any database
//! work starts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Type and shape checks                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (business rule validation)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (username, bill_number, mobile)                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_BILL_LINES, MAX_LINE_QTY_GRAMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be between 3 and 50 characters
/// - Only alphanumeric characters, hyphens, underscores, dots
///
/// ## Example
/// ```rust
/// use veggie_core::validation::validate_username;
///
/// assert!(validate_username("suji_veg").is_ok());
/// assert!(validate_username("").is_err());
/// assert!(validate_username("a b").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: 3,
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores, and dots"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a password.
///
/// Length only; composition rules are a policy question for the frontend.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    if password.len() > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    Ok(())
}

/// Validates a mobile number: 10-15 digits, nothing else.
///
/// ## Example
/// ```rust
/// use veggie_core::validation::validate_mobile_number;
///
/// assert!(validate_mobile_number("9095938085").is_ok());
/// assert!(validate_mobile_number("12345").is_err());
/// assert!(validate_mobile_number("+919095938085").is_err());
/// ```
pub fn validate_mobile_number(mobile: &str) -> ValidationResult<()> {
    if !(10..=15).contains(&mobile.len()) || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile_number".to_string(),
            reason: "must be 10-15 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Billing Fields
// =============================================================================

/// Validates a bill line quantity in grams.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed `MAX_LINE_QTY_GRAMS`
pub fn validate_qty_grams(qty_grams: i64) -> ValidationResult<()> {
    if qty_grams <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty_grams".to_string(),
        });
    }

    if qty_grams > MAX_LINE_QTY_GRAMS {
        return Err(ValidationError::OutOfRange {
            field: "qty_grams".to_string(),
            min: 1,
            max: MAX_LINE_QTY_GRAMS,
        });
    }

    Ok(())
}

/// Validates a price in paise (inventory prices and overrides).
pub fn validate_price_paise(price_paise: i64) -> ValidationResult<()> {
    if price_paise < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price_paise".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level in grams (inventory setup/update).
pub fn validate_stock_grams(stock_grams: i64) -> ValidationResult<()> {
    if stock_grams < 0 {
        return Err(ValidationError::MustBePositive {
            field: "stock_grams".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of lines on a bill.
pub fn validate_line_count(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if count > MAX_BILL_LINES {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_BILL_LINES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("suji_veg").is_ok());
        assert!(validate_username("shop.01").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_mobile_number() {
        assert!(validate_mobile_number("9095938085").is_ok());
        assert!(validate_mobile_number("919095938085").is_ok());
        assert!(validate_mobile_number("123456789").is_err()); // 9 digits
        assert!(validate_mobile_number("1234567890123456").is_err()); // 16 digits
        assert!(validate_mobile_number("+919095938085").is_err());
        assert!(validate_mobile_number("90959 38085").is_err());
    }

    #[test]
    fn test_validate_qty_grams() {
        assert!(validate_qty_grams(250).is_ok());
        assert!(validate_qty_grams(MAX_LINE_QTY_GRAMS).is_ok());
        assert!(validate_qty_grams(0).is_err());
        assert!(validate_qty_grams(-100).is_err());
        assert!(validate_qty_grams(MAX_LINE_QTY_GRAMS + 1).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(2000).is_ok());
        assert!(validate_price_paise(-1).is_err());

        assert!(validate_stock_grams(0).is_ok());
        assert!(validate_stock_grams(-1).is_err());
    }

    #[test]
    fn test_validate_line_count() {
        assert!(validate_line_count(1).is_ok());
        assert!(validate_line_count(MAX_BILL_LINES).is_ok());
        assert!(validate_line_count(0).is_err());
        assert!(validate_line_count(MAX_BILL_LINES + 1).is_err());
    }
}
