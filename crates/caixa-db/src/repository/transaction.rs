//! # Transaction Repository
//!
//! Database operations for sale and withdrawal rows.
//!
//! Rows are append-only: there is no update or delete here. A transaction
//! belongs to exactly one shift and is only ever written while that shift
//! is open (the ledger enforces the lifecycle; the CHECK constraints and
//! the shift_id foreign key back it up).

use sqlx::SqlitePool;
use tracing::debug;

use caixa_core::{CashTransaction, TransactionKind};

use crate::error::DbResult;

/// Repository for cash transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts a transaction row.
    pub async fn insert(&self, tx: &CashTransaction) -> DbResult<()> {
        debug!(
            id = %tx.id,
            shift_id = %tx.shift_id,
            amount_cents = tx.amount_cents,
            "Inserting transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, shift_id, kind, amount_cents, method, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.shift_id)
        .bind(tx.kind)
        .bind(tx.amount_cents)
        .bind(tx.method)
        .bind(&tx.description)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a transaction by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CashTransaction>> {
        let tx = sqlx::query_as::<_, CashTransaction>(
            r#"
            SELECT id, shift_id, kind, amount_cents, method, description, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    /// Lists all transactions for a shift, newest first (the order the
    /// closing-conference screen shows them).
    pub async fn list_for_shift(&self, shift_id: &str) -> DbResult<Vec<CashTransaction>> {
        let txs = sqlx::query_as::<_, CashTransaction>(
            r#"
            SELECT id, shift_id, kind, amount_cents, method, description, created_at
            FROM transactions
            WHERE shift_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    /// Sums transaction amounts of one kind for a shift.
    ///
    /// SUM over zero rows is NULL, which collapses to 0 here.
    pub async fn sum_for_shift(&self, shift_id: &str, kind: TransactionKind) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(amount_cents) FROM transactions WHERE shift_id = ?1 AND kind = ?2",
        )
        .bind(shift_id)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }

    /// Sums cash-method sales for a shift (the drawer side of revenue).
    pub async fn sum_cash_sales(&self, shift_id: &str) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(amount_cents) FROM transactions \
             WHERE shift_id = ?1 AND kind = 'sale' AND method = 'cash'",
        )
        .bind(shift_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }

    /// Number of transactions recorded for a shift.
    pub async fn count_for_shift(&self, shift_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE shift_id = ?1")
                .bind(shift_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use caixa_core::{PaymentMethod, ShiftKind};
    use chrono::Utc;
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn tx(shift_id: &str, kind: TransactionKind, method: PaymentMethod, cents: i64) -> CashTransaction {
        CashTransaction {
            id: Uuid::new_v4().to_string(),
            shift_id: shift_id.to_string(),
            kind,
            amount_cents: cents,
            method,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = test_db().await;
        let shift = db.shifts().open("maria", ShiftKind::Morning, 0).await.unwrap();
        let repo = db.transactions();

        let sale = tx(&shift.id, TransactionKind::Sale, PaymentMethod::Pix, 4_500);
        repo.insert(&sale).await.unwrap();

        let fetched = repo.get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.amount_cents, 4_500);
        assert_eq!(fetched.kind, TransactionKind::Sale);
        assert_eq!(fetched.method, PaymentMethod::Pix);

        let listed = repo.list_for_shift(&shift.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(repo.count_for_shift(&shift.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sums_by_kind_and_method() {
        let db = test_db().await;
        let shift = db.shifts().open("maria", ShiftKind::Night, 0).await.unwrap();
        let repo = db.transactions();

        repo.insert(&tx(&shift.id, TransactionKind::Sale, PaymentMethod::Cash, 3_000))
            .await
            .unwrap();
        repo.insert(&tx(&shift.id, TransactionKind::Sale, PaymentMethod::Debit, 7_000))
            .await
            .unwrap();
        repo.insert(&tx(&shift.id, TransactionKind::Withdrawal, PaymentMethod::Cash, 1_500))
            .await
            .unwrap();

        assert_eq!(
            repo.sum_for_shift(&shift.id, TransactionKind::Sale).await.unwrap(),
            10_000
        );
        assert_eq!(
            repo.sum_for_shift(&shift.id, TransactionKind::Withdrawal)
                .await
                .unwrap(),
            1_500
        );
        assert_eq!(repo.sum_cash_sales(&shift.id).await.unwrap(), 3_000);
    }

    #[tokio::test]
    async fn test_sum_empty_shift_is_zero() {
        let db = test_db().await;
        let shift = db.shifts().open("maria", ShiftKind::Morning, 0).await.unwrap();

        let repo = db.transactions();
        assert_eq!(
            repo.sum_for_shift(&shift.id, TransactionKind::Sale).await.unwrap(),
            0
        );
        assert_eq!(repo.sum_cash_sales(&shift.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_foreign_key_enforced() {
        let db = test_db().await;
        let repo = db.transactions();

        let orphan = tx("no-such-shift", TransactionKind::Sale, PaymentMethod::Cash, 100);
        let err = repo.insert(&orphan).await.unwrap_err();

        assert!(matches!(
            err,
            crate::error::DbError::ForeignKeyViolation { .. }
        ));
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_non_positive_amount() {
        let db = test_db().await;
        let shift = db.shifts().open("maria", ShiftKind::Morning, 0).await.unwrap();
        let repo = db.transactions();

        let mut zero = tx(&shift.id, TransactionKind::Sale, PaymentMethod::Cash, 100);
        zero.amount_cents = 0;

        // The ledger rejects this before SQL; the CHECK is the backstop
        assert!(repo.insert(&zero).await.is_err());
    }
}
