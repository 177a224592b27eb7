//! Derived totals, computed fresh from the current collections.
//!
//! A pure function: no side effects, no stored state, safe to re-run on
//! every snapshot. Entries with categories outside the fixed set cannot
//! reach this point; the typed model rejects them at parse time, so every
//! stored entry carries a known category.

use rust_decimal::Decimal;
use shared::{ExpenseEntry, IncomeEntry, Totals};

use crate::storage::Snapshot;

/// Compute totals, balance, and per-category sums. Every category from the
/// fixed set is present in the result, zero when unused.
pub fn aggregate(incomes: &[IncomeEntry], expenses: &[ExpenseEntry]) -> Totals {
    let mut totals = Totals::default();

    for income in incomes {
        totals.total_income += income.amount;
    }
    for expense in expenses {
        totals.total_expenses += expense.amount;
        *totals
            .category_totals
            .entry(expense.category)
            .or_insert(Decimal::ZERO) += expense.amount;
    }
    totals.balance = totals.total_income - totals.total_expenses;
    totals
}

/// Convenience over a full snapshot.
pub fn aggregate_snapshot(snapshot: &Snapshot) -> Totals {
    aggregate(&snapshot.incomes, &snapshot.expenses)
}
