//! # Error Types
//!
//! Domain-specific error types for caixa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  caixa-core errors (this file)                                          │
//! │  ├── CoreError        - Shift lifecycle / state errors                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  caixa-db errors (separate crate)                                       │
//! │  ├── DbError          - Database operation failures                     │
//! │  └── LedgerError      - Service seam: Core ∪ Db                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → Caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (shift id, current status, ...)
//! 3. Errors are enum variants, never String
//! 4. Nothing is silently recovered; every error reaches the caller

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Shift lifecycle and business-rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No shift with the given id exists.
    #[error("Shift not found: {0}")]
    ShiftNotFound(String),

    /// An open-shift action was attempted while a shift is already open.
    ///
    /// ## When This Occurs
    /// - Operator tries to open a second shift before closing the first
    /// - Two near-simultaneous open calls race; the loser gets this error
    ///   from the single-open-shift constraint
    #[error("Shift {id} is already open (opened by {operator})")]
    ShiftAlreadyOpen { id: String, operator: String },

    /// Operation requires an open shift but the target is closed.
    ///
    /// ## When This Occurs
    /// - Recording a sale or withdrawal against a closed shift
    /// - Closing a shift that was already closed
    #[error("Shift {id} is not open, cannot perform operation")]
    ShiftNotOpen { id: String },

    /// There is no open shift to operate on.
    #[error("No shift is currently open")]
    NoOpenShift,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any state is touched.
#[derive(Debug, Error)]
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

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is fine).
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
