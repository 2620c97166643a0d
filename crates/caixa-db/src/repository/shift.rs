//! # Shift Repository
//!
//! Database operations for register shifts.
//!
//! ## Shift Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shift Lifecycle                                   │
//! │                                                                         │
//! │  1. OPEN                                                                │
//! │     └── insert() → Shift { status: Open }                               │
//! │         (partial unique index rejects a second open shift)              │
//! │                                                                         │
//! │  2. OPERATE                                                             │
//! │     └── transactions recorded against the open shift                    │
//! │                                                                         │
//! │  3. CLOSE (terminal)                                                    │
//! │     └── mark_closed() → Shift { status: Closed, totals frozen }         │
//! │         Guarded by WHERE status = 'open'; closed shifts are never       │
//! │         reopened or amended - they are the audit trail.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use caixa_core::{Shift, ShiftKind, ShiftStatus, ShiftSummary};

use crate::error::{DbError, DbResult};

/// Every `SELECT` of a full shift row uses the same column list so the
/// `FromRow` decode stays in one shape.
const SHIFT_COLUMNS: &str = "id, operator, kind, status, opening_cash_cents, \
     total_sales_cents, total_withdrawals_cents, closing_cash_cents, \
     closed_by, opened_at, closed_at";

/// Repository for shift database operations.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    /// Creates a new ShiftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftRepository { pool }
    }

    /// Gets a shift by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    /// Finds the currently open shift, if any.
    ///
    /// The single-open-shift invariant means this returns at most one row;
    /// `ORDER BY opened_at DESC LIMIT 1` is belt and braces against a
    /// database restored from before the index existed.
    pub async fn find_open(&self) -> DbResult<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>(&format!(
            "SELECT {SHIFT_COLUMNS} FROM shifts \
             WHERE status = 'open' ORDER BY opened_at DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    /// Inserts a shift row.
    ///
    /// A second open shift fails here with a unique violation on
    /// `idx_shifts_single_open`; the ledger maps that to a state error.
    pub async fn insert(&self, shift: &Shift) -> DbResult<()> {
        debug!(id = %shift.id, operator = %shift.operator, "Inserting shift");

        sqlx::query(
            r#"
            INSERT INTO shifts (
                id, operator, kind, status, opening_cash_cents,
                total_sales_cents, total_withdrawals_cents, closing_cash_cents,
                closed_by, opened_at, closed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&shift.id)
        .bind(&shift.operator)
        .bind(shift.kind)
        .bind(shift.status)
        .bind(shift.opening_cash_cents)
        .bind(shift.total_sales_cents)
        .bind(shift.total_withdrawals_cents)
        .bind(shift.closing_cash_cents)
        .bind(&shift.closed_by)
        .bind(shift.opened_at)
        .bind(shift.closed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Builds and inserts a fresh open shift.
    ///
    /// ## Returns
    /// The created shift with generated ID.
    pub async fn open(
        &self,
        operator: &str,
        kind: ShiftKind,
        opening_cash_cents: i64,
    ) -> DbResult<Shift> {
        let shift = Shift {
            id: Uuid::new_v4().to_string(),
            operator: operator.to_string(),
            kind,
            status: ShiftStatus::Open,
            opening_cash_cents,
            total_sales_cents: None,
            total_withdrawals_cents: None,
            closing_cash_cents: None,
            closed_by: None,
            opened_at: Utc::now(),
            closed_at: None,
        };

        self.insert(&shift).await?;
        Ok(shift)
    }

    /// Marks a shift closed and freezes its totals.
    ///
    /// Guarded update: `WHERE status = 'open'` makes the open→closed
    /// transition a check-and-set. Zero rows affected means the shift was
    /// already closed (or never existed) and the caller gets an error
    /// instead of a silent double close.
    #[allow(clippy::too_many_arguments)]
    pub async fn mark_closed(
        &self,
        shift_id: &str,
        closed_by: &str,
        closed_at: DateTime<Utc>,
        total_sales_cents: i64,
        total_withdrawals_cents: i64,
        closing_cash_cents: i64,
    ) -> DbResult<()> {
        debug!(id = %shift_id, closed_by = %closed_by, "Closing shift");

        let result = sqlx::query(
            r#"
            UPDATE shifts SET
                status = 'closed',
                closed_by = ?2,
                closed_at = ?3,
                total_sales_cents = ?4,
                total_withdrawals_cents = ?5,
                closing_cash_cents = ?6
            WHERE id = ?1 AND status = 'open'
            "#,
        )
        .bind(shift_id)
        .bind(closed_by)
        .bind(closed_at)
        .bind(total_sales_cents)
        .bind(total_withdrawals_cents)
        .bind(closing_cash_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Shift (open)", shift_id));
        }

        Ok(())
    }

    /// Lists shift summaries whose opening date falls in the given range,
    /// newest first, optionally filtered by status.
    pub async fn list_summaries(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: Option<ShiftStatus>,
    ) -> DbResult<Vec<ShiftSummary>> {
        let summaries = sqlx::query_as::<_, ShiftSummary>(
            r#"
            SELECT id, operator, kind, status, opened_at, closed_at, total_sales_cents
            FROM shifts
            WHERE DATE(opened_at) BETWEEN DATE(?1) AND DATE(?2)
              AND (?3 IS NULL OR status = ?3)
            ORDER BY opened_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Total number of shift rows (diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shifts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
