//! # caixa-core: Pure Business Logic for the Register
//!
//! This crate is the **heart** of the shift-control system. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        System Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Presentation (dashboards, export, auth) - external     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                caixa-db (ShiftLedger service)                   │   │
//! │  │      open_shift, record_sale, record_withdrawal, close_shift    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caixa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│   │   │
//! │  │   │   Shift   │  │   Money   │  │  Totals   │  │   rules   │   │   │
//! │  │   │ CashTxn   │  │  (BRL)    │  │ Breakdown │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Shift, CashTransaction, enums)
//! - [`money`] - Money type with integer centavo arithmetic (no floats!)
//! - [`report`] - Totals, expected-cash math, payment breakdown
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caixa_core::money::Money;
//! use caixa_core::report::compute_totals;
//!
//! // Create money from centavos (never from floats!)
//! let opening = Money::from_centavos(10_000); // R$ 100,00
//!
//! // An empty shift's net balance is just the opening float
//! let totals = compute_totals(opening.centavos(), &[]);
//! assert_eq!(totals.net(), opening);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caixa_core::Money` instead of
// `use caixa_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{PaymentTotal, ShiftReport, ShiftTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an operator name.
pub const MAX_OPERATOR_LEN: usize = 100;

/// Maximum length of a transaction description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum single-transaction amount: R$ 1.000.000,00.
///
/// ## Business Reason
/// A register movement past this is a typo (e.g. an extra pair of zeros),
/// not a sale. Can be made configurable per installation later.
pub const MAX_TRANSACTION_CENTS: i64 = 100_000_000;
