//! # Domain Types
//!
//! Core domain types for cash-register shift control.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │     Shift       │   │ CashTransaction  │   │  ShiftSummary   │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)      │   │  id (UUID)       │   │  id (UUID)      │      │
//! │  │  operator       │   │  shift_id (FK)   │   │  status         │      │
//! │  │  status         │   │  kind            │   │  opened_at      │      │
//! │  │  opening cash   │   │  amount_cents    │   │  sales total    │      │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  ShiftStatus    │   │ TransactionKind  │   │ PaymentMethod   │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  Open           │   │  Sale            │   │  Cash, Debit,   │      │
//! │  │  Closed         │   │  Withdrawal      │   │  Credit, Pix, … │      │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Shift` owns its `CashTransaction` rows (composition): a transaction
//! only ever exists inside exactly one shift and is purged with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Shift Status
// =============================================================================

/// Lifecycle state of a register shift.
///
/// The lifecycle is two-state and terminal: `Open → Closed`, never back.
/// Closed shifts are the audit trail and are never amended or reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Shift is active; sales and withdrawals may be recorded.
    Open,
    /// Shift has been closed; totals are frozen. Terminal.
    Closed,
}

impl Default for ShiftStatus {
    fn default() -> Self {
        ShiftStatus::Open
    }
}

// =============================================================================
// Shift Kind
// =============================================================================

/// Which working period of the day the shift covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Turno da manhã.
    Morning,
    /// Turno da noite.
    Night,
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// Direction of a cash-register movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Revenue entering the register.
    Sale,
    /// A "sangria": cash removed from the drawer mid-shift.
    Withdrawal,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Only `Cash` affects the physical drawer balance; everything else is
/// settled electronically and shows up in revenue totals but not in the
/// expected-cash calculation. Withdrawals are always `Cash`: sangria
/// removes physical money by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Dinheiro: physical cash in the drawer.
    Cash,
    /// Debit card on the terminal.
    Debit,
    /// Credit card on the terminal.
    Credit,
    /// PIX instant transfer.
    Pix,
    /// Vale refeição / meal ticket.
    MealVoucher,
    /// Paid online (delivery platforms etc.).
    Online,
}

impl PaymentMethod {
    /// Whether this method puts physical money into the drawer.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Shift
// =============================================================================

/// A bounded period during which the register is operated.
///
/// Created by opening, mutated exactly once by closing, never deleted.
/// The `total_*` and `closing_cash_cents` columns stay `None` while the
/// shift is open and are frozen by the close operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shift {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Operator who opened the shift.
    pub operator: String,

    /// Morning or night shift.
    pub kind: ShiftKind,

    /// Current lifecycle state.
    pub status: ShiftStatus,

    /// Opening cash float ("suprimento") in centavos. Never negative.
    pub opening_cash_cents: i64,

    /// Gross sales total, frozen at close.
    pub total_sales_cents: Option<i64>,

    /// Withdrawal total, frozen at close.
    pub total_withdrawals_cents: Option<i64>,

    /// Expected physical cash in the drawer, frozen at close.
    pub closing_cash_cents: Option<i64>,

    /// Operator who closed the shift.
    pub closed_by: Option<String>,

    /// When the shift was opened.
    pub opened_at: DateTime<Utc>,

    /// When the shift was closed (None while open).
    pub closed_at: Option<DateTime<Utc>>,
}

impl Shift {
    /// Whether the shift currently accepts transactions.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == ShiftStatus::Open
    }

    /// Returns the opening cash float as Money.
    #[inline]
    pub fn opening_cash(&self) -> Money {
        Money::from_centavos(self.opening_cash_cents)
    }

    /// Returns the frozen closing cash as Money, if the shift is closed.
    #[inline]
    pub fn closing_cash(&self) -> Option<Money> {
        self.closing_cash_cents.map(Money::from_centavos)
    }
}

// =============================================================================
// Cash Transaction
// =============================================================================

/// A single movement recorded against an open shift.
///
/// Immutable once written: corrections are made by recording a
/// compensating movement, never by editing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CashTransaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning shift. A transaction never outlives or changes its shift.
    pub shift_id: String,

    /// Sale or withdrawal.
    pub kind: TransactionKind,

    /// Amount in centavos. Strictly positive; direction comes from `kind`.
    pub amount_cents: i64,

    /// Payment method. Always `Cash` for withdrawals.
    pub method: PaymentMethod,

    /// Free-form note (table number, withdrawal reason, ...).
    pub description: Option<String>,

    /// When the movement was recorded.
    pub created_at: DateTime<Utc>,
}

impl CashTransaction {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_centavos(self.amount_cents)
    }

    /// Signed effect of this movement on the drawer's physical cash:
    /// positive for cash sales, negative for withdrawals, zero for
    /// electronic sales.
    pub fn drawer_effect(&self) -> Money {
        match self.kind {
            TransactionKind::Sale if self.method.is_cash() => self.amount(),
            TransactionKind::Sale => Money::zero(),
            TransactionKind::Withdrawal => -self.amount(),
        }
    }
}

// =============================================================================
// Shift Summary
// =============================================================================

/// Condensed shift row for date-range listings in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShiftSummary {
    pub id: String,
    pub operator: String,
    pub kind: ShiftKind,
    pub status: ShiftStatus,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub total_sales_cents: Option<i64>,
}

// =============================================================================
// Unit Tests
// =============================================================================
