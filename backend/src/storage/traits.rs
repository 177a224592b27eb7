//! # Storage Traits
//!
//! The capability set shared by both persistence variants. The domain layer
//! and the presentation layer only ever see [`EntryStore`], so the Local and
//! Remote variants are interchangeable behind it.

use shared::{EntryId, ExpenseEntry, IncomeEntry, NewExpense, NewIncome};

use crate::error::StoreError;
use crate::subscription::SubscriptionHandle;

/// Full current state of both entry collections.
///
/// Delivered by [`EntryStore::load`] and on every subscription callback.
/// The caller holds it as a read-only cache; the collections themselves are
/// owned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub incomes: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
}

impl Snapshot {
    /// Normalize for rendering: date descending, insertion order preserved
    /// between entries with equal dates (stable sort). The presentation
    /// layer always sorts, whichever variant produced the snapshot.
    pub fn sort_for_display(&mut self) {
        self.incomes.sort_by(|a, b| b.date.cmp(&a.date));
        self.expenses.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}

/// Listener invoked with the full current snapshot on every change.
///
/// Listeners run on the mutating call's stack; they should hand the snapshot
/// off (typically onto a channel) rather than call back into the store.
pub type SnapshotListener = Box<dyn Fn(&Snapshot) + Send>;

/// The single capability set `{load, subscribe, add, delete}` implemented by
/// both persistence variants.
pub trait EntryStore: Send + Sync {
    /// Read the full current snapshot.
    fn load(&self) -> Result<Snapshot, StoreError>;

    /// Open a live query. The listener receives the current snapshot
    /// immediately, then again on every change to either collection. The
    /// subscription lasts exactly as long as the returned handle.
    fn subscribe(&self, listener: SnapshotListener) -> SubscriptionHandle;

    /// Append a new income entry; the store assigns the id. Observability is
    /// subscription-driven: no optimistic echo beyond the returned id.
    fn add_income(&self, draft: NewIncome) -> Result<EntryId, StoreError>;

    /// Append a new expense entry; the store assigns the id.
    fn add_expense(&self, draft: NewExpense) -> Result<EntryId, StoreError>;

    /// Remove an income entry by id. Unknown ids are a no-op.
    fn delete_income(&self, id: &EntryId) -> Result<(), StoreError>;

    /// Remove an expense entry by id. Unknown ids are a no-op.
    fn delete_expense(&self, id: &EntryId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use shared::Category;

    fn income(id: &str, date: &str) -> IncomeEntry {
        IncomeEntry {
            id: EntryId::new(id),
            source: format!("source {id}"),
            amount: dec!(10),
            date: date.parse::<NaiveDate>().unwrap(),
        }
    }

    fn expense(id: &str, date: &str) -> ExpenseEntry {
        ExpenseEntry {
            id: EntryId::new(id),
            name: format!("name {id}"),
            amount: dec!(5),
            date: date.parse::<NaiveDate>().unwrap(),
            category: Category::Other,
        }
    }

    #[test]
    fn display_sort_is_date_descending() {
        let mut snapshot = Snapshot {
            incomes: vec![
                income("a", "2025-09-01"),
                income("b", "2025-09-15"),
                income("c", "2025-08-20"),
            ],
            expenses: vec![expense("x", "2025-09-02"), expense("y", "2025-09-10")],
        };
        snapshot.sort_for_display();

        let income_ids: Vec<&str> = snapshot.incomes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(income_ids, ["b", "a", "c"]);
        let expense_ids: Vec<&str> = snapshot.expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(expense_ids, ["y", "x"]);
    }

    #[test]
    fn display_sort_keeps_insertion_order_for_equal_dates() {
        let mut snapshot = Snapshot {
            incomes: vec![
                income("first", "2025-09-01"),
                income("second", "2025-09-01"),
                income("third", "2025-09-01"),
            ],
            expenses: Vec::new(),
        };
        snapshot.sort_for_display();

        let ids: Vec<&str> = snapshot.incomes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }
}
