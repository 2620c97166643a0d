//! # Repository Module
//!
//! Database repository implementations for the register.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  Caller / ShiftLedger                                                   │
//! │       │                                                                 │
//! │       │  db.shifts().find_open()                                        │
//! │       ▼                                                                 │
//! │  ShiftRepository                                                        │
//! │  ├── find_open(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, shift)                                               │
//! │  └── mark_closed(&self, ...)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                         │
//! │  • SQL is isolated in one place                                         │
//! │  • Lifecycle rules live above, in the ledger                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`shift::ShiftRepository`] - Shift rows and date-range summaries
//! - [`transaction::TransactionRepository`] - Append-only movement rows

pub mod shift;
pub mod transaction;
