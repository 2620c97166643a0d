//! # Shift Ledger Service
//!
//! The guarded state transitions of the register live here: opening and
//! closing shifts, and recording sales and withdrawals against the open
//! shift. Everything mutating runs inside a single SQLite transaction so
//! check-then-write sequences are atomic.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shift Ledger Flow                                │
//! │                                                                         │
//! │  1. OPEN                                                                │
//! │     open_shift(operator, kind, opening_cash)                            │
//! │     └── one tx: [check no open shift] → [insert]                        │
//! │         backstop: idx_shifts_single_open unique index                   │
//! │                                                                         │
//! │  2. RECORD (repeatedly)                                                 │
//! │     record_sale(shift, amount, method, note)                            │
//! │     record_withdrawal(shift, amount, note)                              │
//! │     └── one tx: [check shift is open] → [insert movement]               │
//! │                                                                         │
//! │  3. CLOSE (terminal)                                                    │
//! │     close_shift(shift, closed_by, final_withdrawal)                     │
//! │     └── one tx: [check open] → [optional final sangria]                 │
//! │                → [sum movements] → [freeze totals, status=closed]       │
//! │                                                                         │
//! │  4. REPORT (any time, open or closed)                                   │
//! │     totals(shift) / report(shift)                                       │
//! │     └── read-only aggregation via caixa-core                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use caixa_core::report::{self, ShiftReport, ShiftTotals};
use caixa_core::validation::{
    validate_amount_cents, validate_description, validate_opening_cash_cents, validate_operator,
};
use caixa_core::{
    CashTransaction, CoreError, PaymentMethod, Shift, ShiftKind, ShiftStatus, TransactionKind,
    ValidationError,
};

use crate::error::DbError;

/// Description attached to the automatic withdrawal recorded when a shift
/// is closed with leftover cash pulled from the drawer.
pub const CLOSING_WITHDRAWAL_NOTE: &str = "Sangria de fechamento de turno";

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors surfaced by ledger operations: domain state violations from
/// caixa-core or persistence failures from this crate.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Core(CoreError::Validation(err))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Shift Ledger
// =============================================================================

/// Service owning the shift lifecycle and the transaction recorder.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = db.ledger();
///
/// let shift = ledger.open_shift("maria", ShiftKind::Morning, 10_000).await?;
/// ledger.record_sale(&shift.id, 5_000, PaymentMethod::Cash, Some("mesa 3")).await?;
/// ledger.record_withdrawal(&shift.id, 2_000, Some("troco para o motoboy")).await?;
/// let closed = ledger.close_shift(&shift.id, "maria", None).await?;
///
/// assert_eq!(closed.total_sales_cents, Some(5_000));
/// ```
#[derive(Debug, Clone)]
pub struct ShiftLedger {
    pool: SqlitePool,
}

impl ShiftLedger {
    /// Creates a new ShiftLedger.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftLedger { pool }
    }

    // -------------------------------------------------------------------------
    // Shift lifecycle
    // -------------------------------------------------------------------------

    /// Opens a new shift.
    ///
    /// ## Errors
    /// - `Validation` - empty operator, negative opening cash
    /// - `ShiftAlreadyOpen` - another shift is open (checked inside the
    ///   transaction; a lost race against a concurrent open surfaces the
    ///   same error via the unique index)
    pub async fn open_shift(
        &self,
        operator: &str,
        kind: ShiftKind,
        opening_cash_cents: i64,
    ) -> LedgerResult<Shift> {
        let operator = validate_operator(operator)?;
        validate_opening_cash_cents(opening_cash_cents)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        if let Some(open) = fetch_open_shift(&mut tx).await? {
            return Err(CoreError::ShiftAlreadyOpen {
                id: open.id,
                operator: open.operator,
            }
            .into());
        }

        let shift = Shift {
            id: Uuid::new_v4().to_string(),
            operator,
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

        let inserted = sqlx::query(
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
        .execute(&mut *tx)
        .await
        .map_err(DbError::from);

        match inserted {
            Ok(_) => {}
            // Concurrent open won the race between our check and insert
            Err(err) if err.is_unique_violation_on("shifts") => {
                return Err(CoreError::ShiftAlreadyOpen {
                    id: "unknown".to_string(),
                    operator: "unknown".to_string(),
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            id = %shift.id,
            operator = %shift.operator,
            opening_cash_cents = shift.opening_cash_cents,
            "Shift opened"
        );

        Ok(shift)
    }

    /// Closes a shift: freezes totals, records who closed it and when.
    ///
    /// An optional final withdrawal ("sangria de fechamento") is recorded
    /// first and therefore included in the frozen withdrawal total. Passing
    /// `Some(0)` is treated as no withdrawal.
    ///
    /// ## Errors
    /// - `ShiftNotFound` - unknown shift id
    /// - `ShiftNotOpen` - shift already closed
    /// - `Validation` - empty closer name, negative final withdrawal
    pub async fn close_shift(
        &self,
        shift_id: &str,
        closed_by: &str,
        final_withdrawal_cents: Option<i64>,
    ) -> LedgerResult<Shift> {
        let closed_by = validate_operator(closed_by)?;
        if let Some(cents) = final_withdrawal_cents {
            if cents < 0 {
                return Err(ValidationError::MustNotBeNegative {
                    field: "final withdrawal".to_string(),
                }
                .into());
            }
        }

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let shift = fetch_shift(&mut tx, shift_id)
            .await?
            .ok_or_else(|| CoreError::ShiftNotFound(shift_id.to_string()))?;

        if !shift.is_open() {
            return Err(CoreError::ShiftNotOpen {
                id: shift_id.to_string(),
            }
            .into());
        }

        let now = Utc::now();

        if let Some(cents) = final_withdrawal_cents.filter(|&c| c > 0) {
            let sangria = CashTransaction {
                id: Uuid::new_v4().to_string(),
                shift_id: shift.id.clone(),
                kind: TransactionKind::Withdrawal,
                amount_cents: cents,
                method: PaymentMethod::Cash,
                description: Some(CLOSING_WITHDRAWAL_NOTE.to_string()),
                created_at: now,
            };
            insert_transaction(&mut tx, &sangria).await?;
        }

        let total_sales = sum_amounts(&mut tx, shift_id, TransactionKind::Sale).await?;
        let total_withdrawals = sum_amounts(&mut tx, shift_id, TransactionKind::Withdrawal).await?;
        let cash_sales = sum_cash_sales(&mut tx, shift_id).await?;
        let closing_cash = shift.opening_cash_cents + cash_sales - total_withdrawals;

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
        .bind(&closed_by)
        .bind(now)
        .bind(total_sales)
        .bind(total_withdrawals)
        .bind(closing_cash)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ShiftNotOpen {
                id: shift_id.to_string(),
            }
            .into());
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            id = %shift_id,
            closed_by = %closed_by,
            total_sales_cents = total_sales,
            total_withdrawals_cents = total_withdrawals,
            closing_cash_cents = closing_cash,
            "Shift closed"
        );

        Ok(Shift {
            status: ShiftStatus::Closed,
            total_sales_cents: Some(total_sales),
            total_withdrawals_cents: Some(total_withdrawals),
            closing_cash_cents: Some(closing_cash),
            closed_by: Some(closed_by),
            closed_at: Some(now),
            ..shift
        })
    }

    /// Returns the currently open shift, if any.
    pub async fn current_shift(&self) -> LedgerResult<Option<Shift>> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let shift = fetch_open_shift(&mut tx).await?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(shift)
    }

    /// Returns a shift by id, or `ShiftNotFound`.
    pub async fn get_shift(&self, shift_id: &str) -> LedgerResult<Shift> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;
        let shift = fetch_shift(&mut tx, shift_id)
            .await?
            .ok_or_else(|| CoreError::ShiftNotFound(shift_id.to_string()))?;
        tx.commit().await.map_err(DbError::from)?;
        Ok(shift)
    }

    // -------------------------------------------------------------------------
    // Transaction recorder
    // -------------------------------------------------------------------------

    /// Records a sale against an open shift.
    ///
    /// ## Errors
    /// - `Validation` - amount ≤ 0 or over the per-movement cap
    /// - `ShiftNotFound` / `ShiftNotOpen`
    pub async fn record_sale(
        &self,
        shift_id: &str,
        amount_cents: i64,
        method: PaymentMethod,
        description: Option<&str>,
    ) -> LedgerResult<CashTransaction> {
        self.record(shift_id, TransactionKind::Sale, amount_cents, method, description)
            .await
    }

    /// Records a cash withdrawal ("sangria") against an open shift.
    ///
    /// Withdrawals always move physical cash, so the method is fixed.
    pub async fn record_withdrawal(
        &self,
        shift_id: &str,
        amount_cents: i64,
        description: Option<&str>,
    ) -> LedgerResult<CashTransaction> {
        self.record(
            shift_id,
            TransactionKind::Withdrawal,
            amount_cents,
            PaymentMethod::Cash,
            description,
        )
        .await
    }

    /// Shared record path: validate, check the shift is open, insert.
    async fn record(
        &self,
        shift_id: &str,
        kind: TransactionKind,
        amount_cents: i64,
        method: PaymentMethod,
        description: Option<&str>,
    ) -> LedgerResult<CashTransaction> {
        validate_amount_cents(amount_cents)?;
        let description = validate_description(description)?;

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let status = fetch_shift_status(&mut tx, shift_id)
            .await?
            .ok_or_else(|| CoreError::ShiftNotFound(shift_id.to_string()))?;

        if status != ShiftStatus::Open {
            return Err(CoreError::ShiftNotOpen {
                id: shift_id.to_string(),
            }
            .into());
        }

        let movement = CashTransaction {
            id: Uuid::new_v4().to_string(),
            shift_id: shift_id.to_string(),
            kind,
            amount_cents,
            method,
            description,
            created_at: Utc::now(),
        };

        insert_transaction(&mut tx, &movement).await?;
        tx.commit().await.map_err(DbError::from)?;

        debug!(
            id = %movement.id,
            shift_id = %shift_id,
            kind = ?kind,
            amount_cents,
            "Movement recorded"
        );

        Ok(movement)
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    /// Computes totals for a shift, open or closed.
    ///
    /// Pure aggregation: for a closed shift the result must equal the
    /// frozen columns, and further (rejected) record attempts never
    /// change it.
    pub async fn totals(&self, shift_id: &str) -> LedgerResult<ShiftTotals> {
        let shift = self.get_shift(shift_id).await?;
        let transactions = list_transactions(&self.pool, shift_id).await?;
        Ok(report::compute_totals(
            shift.opening_cash_cents,
            &transactions,
        ))
    }

    /// Builds the full closing-conference report for a shift.
    pub async fn report(&self, shift_id: &str) -> LedgerResult<ShiftReport> {
        let shift = self.get_shift(shift_id).await?;
        let transactions = list_transactions(&self.pool, shift_id).await?;
        Ok(ShiftReport::build(shift, transactions))
    }
}

// =============================================================================
// Transaction-scoped helpers
// =============================================================================
// These run against a `&mut Transaction` so the ledger's check-then-write
// sequences stay atomic. The repositories expose the same queries for
// plain (non-transactional) reads.

const SHIFT_COLUMNS: &str = "id, operator, kind, status, opening_cash_cents, \
     total_sales_cents, total_withdrawals_cents, closing_cash_cents, \
     closed_by, opened_at, closed_at";

async fn fetch_shift(
    tx: &mut Transaction<'_, Sqlite>,
    shift_id: &str,
) -> Result<Option<Shift>, DbError> {
    let shift = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1"
    ))
    .bind(shift_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(shift)
}

async fn fetch_open_shift(tx: &mut Transaction<'_, Sqlite>) -> Result<Option<Shift>, DbError> {
    let shift = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts \
         WHERE status = 'open' ORDER BY opened_at DESC LIMIT 1"
    ))
    .fetch_optional(&mut **tx)
    .await?;

    Ok(shift)
}

async fn fetch_shift_status(
    tx: &mut Transaction<'_, Sqlite>,
    shift_id: &str,
) -> Result<Option<ShiftStatus>, DbError> {
    let status = sqlx::query_scalar::<_, ShiftStatus>("SELECT status FROM shifts WHERE id = ?1")
        .bind(shift_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(status)
}

async fn insert_transaction(
    tx: &mut Transaction<'_, Sqlite>,
    movement: &CashTransaction,
) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO transactions (
            id, shift_id, kind, amount_cents, method, description, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&movement.id)
    .bind(&movement.shift_id)
    .bind(movement.kind)
    .bind(movement.amount_cents)
    .bind(movement.method)
    .bind(&movement.description)
    .bind(movement.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn sum_amounts(
    tx: &mut Transaction<'_, Sqlite>,
    shift_id: &str,
    kind: TransactionKind,
) -> Result<i64, DbError> {
    let total: Option<i64> = sqlx::query_scalar(
        "SELECT SUM(amount_cents) FROM transactions WHERE shift_id = ?1 AND kind = ?2",
    )
    .bind(shift_id)
    .bind(kind)
    .fetch_one(&mut **tx)
    .await?;

    Ok(total.unwrap_or(0))
}

async fn sum_cash_sales(
    tx: &mut Transaction<'_, Sqlite>,
    shift_id: &str,
) -> Result<i64, DbError> {
    let total: Option<i64> = sqlx::query_scalar(
        "SELECT SUM(amount_cents) FROM transactions \
         WHERE shift_id = ?1 AND kind = 'sale' AND method = 'cash'",
    )
    .bind(shift_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(total.unwrap_or(0))
}

async fn list_transactions(
    pool: &SqlitePool,
    shift_id: &str,
) -> Result<Vec<CashTransaction>, DbError> {
    let transactions = sqlx::query_as::<_, CashTransaction>(
        r#"
        SELECT id, shift_id, kind, amount_cents, method, description, created_at
        FROM transactions
        WHERE shift_id = ?1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(shift_id)
    .fetch_all(pool)
    .await?;

    Ok(transactions)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn assert_state_err(err: LedgerError, check: impl Fn(&CoreError) -> bool) {
        match err {
            LedgerError::Core(core) => assert!(check(&core), "unexpected error: {core}"),
            LedgerError::Db(db) => panic!("expected state error, got db error: {db}"),
        }
    }

    #[tokio::test]
    async fn test_open_shift() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger
            .open_shift("maria", ShiftKind::Morning, 10_000)
            .await
            .unwrap();

        assert!(shift.is_open());
        assert_eq!(shift.operator, "maria");
        assert_eq!(shift.opening_cash_cents, 10_000);
        assert!(shift.total_sales_cents.is_none());

        let current = ledger.current_shift().await.unwrap().unwrap();
        assert_eq!(current.id, shift.id);
    }

    #[tokio::test]
    async fn test_open_shift_validation() {
        let db = test_db().await;
        let ledger = db.ledger();

        let err = ledger.open_shift("", ShiftKind::Morning, 0).await.unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::Validation(_)));

        let err = ledger
            .open_shift("maria", ShiftKind::Morning, -100)
            .await
            .unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_open_while_open_fails() {
        let db = test_db().await;
        let ledger = db.ledger();

        let first = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();
        let err = ledger
            .open_shift("joão", ShiftKind::Night, 0)
            .await
            .unwrap_err();

        assert_state_err(err, |e| {
            matches!(e, CoreError::ShiftAlreadyOpen { id, .. } if *id == first.id)
        });

        // Still exactly one shift
        assert_eq!(db.shifts().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_record_sale_and_withdrawal() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Night, 10_000).await.unwrap();

        let sale = ledger
            .record_sale(&shift.id, 5_000, PaymentMethod::Cash, Some("mesa 3"))
            .await
            .unwrap();
        assert_eq!(sale.kind, TransactionKind::Sale);
        assert_eq!(sale.description.as_deref(), Some("mesa 3"));

        let sangria = ledger
            .record_withdrawal(&shift.id, 2_000, Some("troco"))
            .await
            .unwrap();
        assert_eq!(sangria.kind, TransactionKind::Withdrawal);
        assert_eq!(sangria.method, PaymentMethod::Cash);

        let totals = ledger.totals(&shift.id).await.unwrap();
        assert_eq!(totals.total_sales_cents, 5_000);
        assert_eq!(totals.total_withdrawals_cents, 2_000);
        assert_eq!(totals.net_cents, 13_000);
    }

    #[tokio::test]
    async fn test_non_positive_amounts_rejected() {
        let db = test_db().await;
        let ledger = db.ledger();
        let shift = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();

        for amount in [0, -1, -5_000] {
            let err = ledger
                .record_sale(&shift.id, amount, PaymentMethod::Cash, None)
                .await
                .unwrap_err();
            assert_state_err(err, |e| matches!(e, CoreError::Validation(_)));

            let err = ledger
                .record_withdrawal(&shift.id, amount, None)
                .await
                .unwrap_err();
            assert_state_err(err, |e| matches!(e, CoreError::Validation(_)));
        }

        assert_eq!(db.transactions().count_for_shift(&shift.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_against_unknown_shift() {
        let db = test_db().await;
        let ledger = db.ledger();

        let err = ledger
            .record_sale("no-such-shift", 1_000, PaymentMethod::Cash, None)
            .await
            .unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotFound(_)));

        let err = ledger.totals("no-such-shift").await.unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotFound(_)));
    }

    #[tokio::test]
    async fn test_record_against_closed_shift_fails() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();
        ledger.close_shift(&shift.id, "maria", None).await.unwrap();

        let err = ledger
            .record_sale(&shift.id, 1_000, PaymentMethod::Cash, None)
            .await
            .unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotOpen { .. }));

        let err = ledger
            .record_withdrawal(&shift.id, 1_000, None)
            .await
            .unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotOpen { .. }));
    }

    /// Opening 100, sale 50, withdrawal 20, close → net 130.
    #[tokio::test]
    async fn test_close_freezes_totals_worked_example() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Night, 10_000).await.unwrap();
        ledger
            .record_sale(&shift.id, 5_000, PaymentMethod::Cash, None)
            .await
            .unwrap();
        ledger
            .record_withdrawal(&shift.id, 2_000, None)
            .await
            .unwrap();

        let closed = ledger.close_shift(&shift.id, "chefe", None).await.unwrap();

        assert_eq!(closed.status, ShiftStatus::Closed);
        assert_eq!(closed.total_sales_cents, Some(5_000));
        assert_eq!(closed.total_withdrawals_cents, Some(2_000));
        assert_eq!(closed.closing_cash_cents, Some(13_000));
        assert_eq!(closed.closed_by.as_deref(), Some("chefe"));

        let totals = ledger.totals(&shift.id).await.unwrap();
        assert_eq!(totals.net_cents, 13_000);

        // Rejected attempts after close don't move the totals
        assert!(ledger
            .record_sale(&shift.id, 9_999, PaymentMethod::Cash, None)
            .await
            .is_err());
        let totals_after = ledger.totals(&shift.id).await.unwrap();
        assert_eq!(totals_after, totals);

        // Stored row matches the returned one
        let stored = ledger.get_shift(&shift.id).await.unwrap();
        assert_eq!(stored.total_sales_cents, Some(5_000));
        assert_eq!(stored.closing_cash_cents, Some(13_000));
    }

    #[tokio::test]
    async fn test_close_twice_fails() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();
        ledger.close_shift(&shift.id, "maria", None).await.unwrap();

        let err = ledger.close_shift(&shift.id, "maria", None).await.unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotOpen { .. }));
    }

    #[tokio::test]
    async fn test_close_unknown_shift_fails() {
        let db = test_db().await;
        let ledger = db.ledger();

        let err = ledger.close_shift("ghost", "maria", None).await.unwrap_err();
        assert_state_err(err, |e| matches!(e, CoreError::ShiftNotFound(_)));
    }

    #[tokio::test]
    async fn test_close_with_final_withdrawal() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Night, 10_000).await.unwrap();
        ledger
            .record_sale(&shift.id, 8_000, PaymentMethod::Cash, None)
            .await
            .unwrap();

        let closed = ledger
            .close_shift(&shift.id, "maria", Some(15_000))
            .await
            .unwrap();

        // The final sangria is part of the frozen totals
        assert_eq!(closed.total_withdrawals_cents, Some(15_000));
        assert_eq!(closed.closing_cash_cents, Some(3_000));

        let report = ledger.report(&shift.id).await.unwrap();
        let sangria = report
            .transactions
            .iter()
            .find(|t| t.kind == TransactionKind::Withdrawal)
            .unwrap();
        assert_eq!(sangria.description.as_deref(), Some(CLOSING_WITHDRAWAL_NOTE));
    }

    #[tokio::test]
    async fn test_close_with_zero_final_withdrawal_records_nothing() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();
        let closed = ledger.close_shift(&shift.id, "maria", Some(0)).await.unwrap();

        assert_eq!(closed.total_withdrawals_cents, Some(0));
        assert_eq!(db.transactions().count_for_shift(&shift.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_close_with_negative_final_withdrawal_rejected() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Morning, 0).await.unwrap();
        let err = ledger
            .close_shift(&shift.id, "maria", Some(-500))
            .await
            .unwrap_err();

        assert_state_err(err, |e| matches!(e, CoreError::Validation(_)));

        // Shift stays open after the rejected close
        assert!(ledger.current_shift().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_totals_split_cash_and_electronic() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Night, 5_000).await.unwrap();
        ledger
            .record_sale(&shift.id, 3_000, PaymentMethod::Cash, None)
            .await
            .unwrap();
        ledger
            .record_sale(&shift.id, 7_000, PaymentMethod::Pix, None)
            .await
            .unwrap();
        ledger
            .record_sale(&shift.id, 2_500, PaymentMethod::Credit, None)
            .await
            .unwrap();
        ledger
            .record_withdrawal(&shift.id, 1_000, None)
            .await
            .unwrap();

        let closed = ledger.close_shift(&shift.id, "maria", None).await.unwrap();

        // Revenue counts everything; the drawer only saw cash
        assert_eq!(closed.total_sales_cents, Some(12_500));
        assert_eq!(closed.closing_cash_cents, Some(5_000 + 3_000 - 1_000));

        let totals = ledger.totals(&shift.id).await.unwrap();
        assert_eq!(totals.cash_sales_cents, 3_000);
        assert_eq!(totals.electronic_sales_cents, 9_500);
        assert_eq!(totals.expected_cash_cents, 7_000);
        assert_eq!(totals.net_cents, 16_500);
    }

    #[tokio::test]
    async fn test_report_contents() {
        let db = test_db().await;
        let ledger = db.ledger();

        let shift = ledger.open_shift("maria", ShiftKind::Morning, 1_000).await.unwrap();
        ledger
            .record_sale(&shift.id, 2_000, PaymentMethod::Cash, Some("balcão"))
            .await
            .unwrap();
        ledger
            .record_sale(&shift.id, 3_000, PaymentMethod::Debit, None)
            .await
            .unwrap();

        let report = ledger.report(&shift.id).await.unwrap();
        assert_eq!(report.shift.id, shift.id);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.totals.total_sales_cents, 5_000);
        assert_eq!(report.payments.len(), 2);
    }

    #[tokio::test]
    async fn test_new_shift_after_close_starts_clean() {
        let db = test_db().await;
        let ledger = db.ledger();

        let first = ledger.open_shift("maria", ShiftKind::Morning, 10_000).await.unwrap();
        ledger
            .record_sale(&first.id, 4_000, PaymentMethod::Cash, None)
            .await
            .unwrap();
        ledger.close_shift(&first.id, "maria", None).await.unwrap();

        let second = ledger.open_shift("joão", ShiftKind::Night, 2_000).await.unwrap();
        let totals = ledger.totals(&second.id).await.unwrap();

        // The previous shift's movements don't leak into the new one
        assert_eq!(totals.total_sales_cents, 0);
        assert_eq!(totals.net_cents, 2_000);
    }
}
