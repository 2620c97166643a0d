//! # Validation Module
//!
//! Input validation utilities for register operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (UI / reporting frontends)                             │
//! │  ├── Basic format checks, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK (amount_cents > 0) constraints                    │
//! │  ├── Partial unique index (single open shift)                           │
//! │  └── Foreign key constraints                                            │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MAX_OPERATOR_LEN, MAX_TRANSACTION_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an operator name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed operator name.
///
/// ## Example
/// ```rust
/// use caixa_core::validation::validate_operator;
///
/// assert_eq!(validate_operator("  Maria  ").unwrap(), "Maria");
/// assert!(validate_operator("").is_err());
/// ```
pub fn validate_operator(operator: &str) -> ValidationResult<String> {
    let operator = operator.trim();

    if operator.is_empty() {
        return Err(ValidationError::Required {
            field: "operator".to_string(),
        });
    }

    if operator.chars().count() > MAX_OPERATOR_LEN {
        return Err(ValidationError::TooLong {
            field: "operator".to_string(),
            max: MAX_OPERATOR_LEN,
        });
    }

    Ok(operator.to_string())
}

/// Validates an optional transaction description.
///
/// ## Rules
/// - May be absent
/// - Empty or whitespace-only collapses to `None`
/// - Must be at most 500 characters
pub fn validate_description(description: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(description) = description else {
        return Ok(None);
    };

    let description = description.trim();
    if description.is_empty() {
        return Ok(None);
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(Some(description.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or withdrawal amount in centavos.
///
/// ## Rules
/// - Must be strictly positive (> 0); a zero-value movement is meaningless
/// - Must not exceed MAX_TRANSACTION_CENTS (guards against fat-finger input)
///
/// ## Example
/// ```rust
/// use caixa_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents(5000).is_ok());
/// assert!(validate_amount_cents(0).is_err());
/// assert!(validate_amount_cents(-100).is_err());
/// ```
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if cents > MAX_TRANSACTION_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_TRANSACTION_CENTS,
        });
    }

    Ok(())
}

/// Validates an opening cash float ("suprimento") in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed: a drawer can legitimately start empty
pub fn validate_opening_cash_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "opening cash".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
