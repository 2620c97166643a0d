//! # caixa-db: Database Layer for the Cash Register
//!
//! This crate persists shifts and their cash movements. It uses SQLite for
//! local storage with sqlx for async operations, and hosts the [`ledger`]
//! service that enforces the register's state machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cash Register Data Flow                           │
//! │                                                                         │
//! │  Caller (seed binary, embedding application)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     caixa-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  ShiftLedger  │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (ledger.rs)  │    │  (shift.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │  transaction) │    │              │  │   │
//! │  │   │ open / close  │───►│ ShiftRepo     │    │ 001_initial_ │  │   │
//! │  │   │ record sale   │    │ Transaction-  │    │ schema.sql   │  │   │
//! │  │   │ record sangria│    │ Repo          │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │          │                                                     │   │
//! │  │          ▼                                                     │   │
//! │  │   caixa-core (pure totals, money, validation)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`ledger`] - Shift lifecycle and movement recording service
//! - [`repository`] - Repository implementations (shift, transaction)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caixa_db::{Database, DbConfig};
//! use caixa_core::{PaymentMethod, ShiftKind};
//!
//! let db = Database::new(DbConfig::new("caixa.db")).await?;
//! let ledger = db.ledger();
//!
//! let shift = ledger.open_shift("maria", ShiftKind::Morning, 10_000).await?;
//! ledger.record_sale(&shift.id, 5_000, PaymentMethod::Pix, None).await?;
//! let closed = ledger.close_shift(&shift.id, "maria", None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Public Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use ledger::{LedgerError, LedgerResult, ShiftLedger};
pub use pool::{Database, DbConfig};
pub use repository::shift::ShiftRepository;
pub use repository::transaction::TransactionRepository;
