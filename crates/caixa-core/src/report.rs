//! # Report Aggregation
//!
//! Pure aggregation over a shift's transactions. Nothing here is
//! persisted: reports are derived on demand from the ledger rows, and the
//! close operation freezes a copy of the headline numbers onto the shift.
//!
//! ## The Balance Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NET BALANCE (revenue view)                                             │
//! │      net = opening cash + total sales − total withdrawals               │
//! │                                                                         │
//! │  EXPECTED CASH (drawer view)                                            │
//! │      expected = opening cash + cash sales − withdrawals                 │
//! │                                                                         │
//! │  Electronic sales (débito, crédito, PIX, ...) count toward revenue      │
//! │  but never enter the drawer, so they appear in `net` and not in         │
//! │  `expected`. At close, the physical count is reconciled against         │
//! │  `expected`, not against `net`.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CashTransaction, PaymentMethod, Shift, TransactionKind};

// =============================================================================
// Shift Totals
// =============================================================================

/// Aggregated totals for one shift.
///
/// Valid for open shifts (live snapshot) and closed shifts alike; for a
/// closed shift these values match the columns frozen at close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTotals {
    /// Gross revenue across all payment methods.
    pub total_sales_cents: i64,

    /// Total removed from the drawer by withdrawals.
    pub total_withdrawals_cents: i64,

    /// Sales paid in physical cash.
    pub cash_sales_cents: i64,

    /// Sales settled electronically (everything that is not cash).
    pub electronic_sales_cents: i64,

    /// Opening cash + sales − withdrawals.
    pub net_cents: i64,

    /// Opening cash + cash sales − withdrawals: what the drawer should hold.
    pub expected_cash_cents: i64,

    /// Number of sale transactions.
    pub sale_count: u64,

    /// Number of withdrawal transactions.
    pub withdrawal_count: u64,
}

impl ShiftTotals {
    /// Net balance as Money.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_centavos(self.net_cents)
    }

    /// Expected drawer cash as Money.
    #[inline]
    pub fn expected_cash(&self) -> Money {
        Money::from_centavos(self.expected_cash_cents)
    }
}

/// Computes shift totals from the opening float and the transaction list.
///
/// Pure function: the database layer feeds it rows, the close operation
/// freezes its output, and tests exercise it directly.
///
/// ## Example
/// ```rust
/// use caixa_core::report::compute_totals;
/// # use caixa_core::types::{CashTransaction, PaymentMethod, TransactionKind};
/// # use chrono::Utc;
/// # fn tx(kind: TransactionKind, cents: i64) -> CashTransaction {
/// #     CashTransaction {
/// #         id: "t".into(), shift_id: "s".into(), kind, amount_cents: cents,
/// #         method: PaymentMethod::Cash, description: None, created_at: Utc::now(),
/// #     }
/// # }
/// let transactions = vec![
///     tx(TransactionKind::Sale, 5_000),
///     tx(TransactionKind::Withdrawal, 2_000),
/// ];
/// let totals = compute_totals(10_000, &transactions);
/// assert_eq!(totals.net_cents, 13_000); // 100 + 50 - 20
/// ```
pub fn compute_totals(opening_cash_cents: i64, transactions: &[CashTransaction]) -> ShiftTotals {
    let mut totals = ShiftTotals {
        total_sales_cents: 0,
        total_withdrawals_cents: 0,
        cash_sales_cents: 0,
        electronic_sales_cents: 0,
        net_cents: 0,
        expected_cash_cents: 0,
        sale_count: 0,
        withdrawal_count: 0,
    };

    for tx in transactions {
        match tx.kind {
            TransactionKind::Sale => {
                totals.total_sales_cents += tx.amount_cents;
                totals.sale_count += 1;
                if tx.method.is_cash() {
                    totals.cash_sales_cents += tx.amount_cents;
                } else {
                    totals.electronic_sales_cents += tx.amount_cents;
                }
            }
            TransactionKind::Withdrawal => {
                totals.total_withdrawals_cents += tx.amount_cents;
                totals.withdrawal_count += 1;
            }
        }
    }

    totals.net_cents =
        opening_cash_cents + totals.total_sales_cents - totals.total_withdrawals_cents;
    totals.expected_cash_cents =
        opening_cash_cents + totals.cash_sales_cents - totals.total_withdrawals_cents;

    totals
}

// =============================================================================
// Payment Breakdown
// =============================================================================

/// Revenue received through one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotal {
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub count: u64,
}

/// Splits sale revenue per payment method, in stable method order.
///
/// Withdrawals are excluded: the breakdown answers "how was revenue
/// received", which is the closing-conference question.
pub fn payment_breakdown(transactions: &[CashTransaction]) -> Vec<PaymentTotal> {
    let mut by_method: std::collections::BTreeMap<PaymentMethod, (i64, u64)> =
        std::collections::BTreeMap::new();

    for tx in transactions {
        if tx.kind != TransactionKind::Sale {
            continue;
        }
        let entry = by_method.entry(tx.method).or_insert((0, 0));
        entry.0 += tx.amount_cents;
        entry.1 += 1;
    }

    by_method
        .into_iter()
        .map(|(method, (amount_cents, count))| PaymentTotal {
            method,
            amount_cents,
            count,
        })
        .collect()
}

// =============================================================================
// Shift Report
// =============================================================================

/// Full closing-conference view of one shift: header, movement list,
/// totals, and the per-method revenue split. Handed to the external
/// reporting/export layer as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftReport {
    pub shift: Shift,
    pub transactions: Vec<CashTransaction>,
    pub totals: ShiftTotals,
    pub payments: Vec<PaymentTotal>,
}

impl ShiftReport {
    /// Assembles a report from a shift and its transactions.
    pub fn build(shift: Shift, transactions: Vec<CashTransaction>) -> Self {
        let totals = compute_totals(shift.opening_cash_cents, &transactions);
        let payments = payment_breakdown(&transactions);
        ShiftReport {
            shift,
            transactions,
            totals,
            payments,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(kind: TransactionKind, method: PaymentMethod, cents: i64) -> CashTransaction {
        CashTransaction {
            id: uuid::Uuid::new_v4().to_string(),
            shift_id: "s1".to_string(),
            kind,
            amount_cents: cents,
            method,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_empty_shift() {
        let totals = compute_totals(10_000, &[]);
        assert_eq!(totals.total_sales_cents, 0);
        assert_eq!(totals.total_withdrawals_cents, 0);
        assert_eq!(totals.net_cents, 10_000);
        assert_eq!(totals.expected_cash_cents, 10_000);
    }

    /// Opening 100, sale 50, withdrawal 20 → net 130.
    #[test]
    fn test_totals_worked_example() {
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::Cash, 5_000),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 2_000),
        ];
        let totals = compute_totals(10_000, &transactions);

        assert_eq!(totals.total_sales_cents, 5_000);
        assert_eq!(totals.total_withdrawals_cents, 2_000);
        assert_eq!(totals.net_cents, 13_000);
        assert_eq!(totals.expected_cash_cents, 13_000);
        assert_eq!(totals.sale_count, 1);
        assert_eq!(totals.withdrawal_count, 1);
    }

    #[test]
    fn test_electronic_sales_do_not_touch_drawer() {
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::Cash, 3_000),
            tx(TransactionKind::Sale, PaymentMethod::Pix, 7_000),
            tx(TransactionKind::Sale, PaymentMethod::Credit, 2_500),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 1_000),
        ];
        let totals = compute_totals(5_000, &transactions);

        assert_eq!(totals.total_sales_cents, 12_500);
        assert_eq!(totals.cash_sales_cents, 3_000);
        assert_eq!(totals.electronic_sales_cents, 9_500);
        // Revenue view counts everything
        assert_eq!(totals.net_cents, 5_000 + 12_500 - 1_000);
        // Drawer view counts cash only
        assert_eq!(totals.expected_cash_cents, 5_000 + 3_000 - 1_000);
    }

    #[test]
    fn test_drawer_can_go_negative() {
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::Debit, 10_000),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 2_000),
        ];
        let totals = compute_totals(1_000, &transactions);

        assert_eq!(totals.expected_cash_cents, -1_000);
        assert!(totals.expected_cash().is_negative());
        assert_eq!(totals.net_cents, 9_000);
    }

    #[test]
    fn test_payment_breakdown_sales_only() {
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::Cash, 1_000),
            tx(TransactionKind::Sale, PaymentMethod::Cash, 2_000),
            tx(TransactionKind::Sale, PaymentMethod::Pix, 4_000),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 500),
        ];
        let breakdown = payment_breakdown(&transactions);

        assert_eq!(breakdown.len(), 2);
        let cash = breakdown
            .iter()
            .find(|p| p.method == PaymentMethod::Cash)
            .unwrap();
        assert_eq!(cash.amount_cents, 3_000);
        assert_eq!(cash.count, 2);

        let pix = breakdown
            .iter()
            .find(|p| p.method == PaymentMethod::Pix)
            .unwrap();
        assert_eq!(pix.amount_cents, 4_000);
        assert_eq!(pix.count, 1);
    }

    #[test]
    fn test_report_build() {
        let shift = Shift {
            id: "s1".to_string(),
            operator: "maria".to_string(),
            kind: crate::types::ShiftKind::Night,
            status: crate::types::ShiftStatus::Open,
            opening_cash_cents: 10_000,
            total_sales_cents: None,
            total_withdrawals_cents: None,
            closing_cash_cents: None,
            closed_by: None,
            opened_at: Utc::now(),
            closed_at: None,
        };
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::Cash, 5_000),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 2_000),
        ];

        let report = ShiftReport::build(shift, transactions);
        assert_eq!(report.totals.net_cents, 13_000);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.payments.len(), 1);
    }

    /// The export layer consumes reports as JSON; the payload must
    /// survive a round-trip with snake_case enum encoding intact.
    #[test]
    fn test_report_json_round_trip() {
        let shift = Shift {
            id: "s1".to_string(),
            operator: "maria".to_string(),
            kind: crate::types::ShiftKind::Morning,
            status: crate::types::ShiftStatus::Open,
            opening_cash_cents: 10_000,
            total_sales_cents: None,
            total_withdrawals_cents: None,
            closing_cash_cents: None,
            closed_by: None,
            opened_at: Utc::now(),
            closed_at: None,
        };
        let transactions = vec![
            tx(TransactionKind::Sale, PaymentMethod::MealVoucher, 5_000),
            tx(TransactionKind::Withdrawal, PaymentMethod::Cash, 2_000),
        ];

        let report = ShiftReport::build(shift, transactions);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"meal_voucher\""));
        assert!(json.contains("\"withdrawal\""));

        let parsed: ShiftReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.totals, report.totals);
        assert_eq!(parsed.shift.id, "s1");
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.payments, report.payments);
    }
}
