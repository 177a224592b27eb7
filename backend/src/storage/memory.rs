//! In-process implementation of the [`DocumentStore`] capability.
//!
//! Backs the remote variant in development and tests: per-user collections
//! held in memory, synchronous snapshot fan-out on every mutation, and a
//! `fail_next_operation` switch for exercising failure paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, error};
use shared::{EntryId, ExpenseEntry, IncomeEntry, NewExpense, NewIncome, UserId};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::document::DocumentStore;
use crate::storage::traits::{Snapshot, SnapshotListener};
use crate::subscription::{Listeners, SubscriptionHandle};

#[derive(Default)]
struct UserCollections {
    incomes: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
}

impl UserCollections {
    /// Snapshot in the store's delivery order: date descending, insertion
    /// order preserved for equal dates (stable sort).
    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot {
            incomes: self.incomes.clone(),
            expenses: self.expenses.clone(),
        };
        snapshot.incomes.sort_by(|a, b| b.date.cmp(&a.date));
        snapshot.expenses.sort_by(|a, b| b.date.cmp(&a.date));
        snapshot
    }
}

/// In-memory per-user document collections with live subscriptions.
#[derive(Default)]
pub struct MemoryDocumentStore {
    users: Mutex<HashMap<UserId, UserCollections>>,
    listeners: Mutex<HashMap<UserId, Arc<Listeners<Snapshot>>>>,
    fail_next: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next mutating operation fail with
    /// [`StoreError::Unavailable`], for failure-path tests.
    pub fn fail_next_operation(&self) {
        self.fail_next.store(true, Ordering::Relaxed);
    }

    fn check_failure(&self, operation: &str) -> Result<(), StoreError> {
        if self.fail_next.swap(false, Ordering::Relaxed) {
            error!("document store unavailable during {operation}");
            return Err(StoreError::Unavailable(format!(
                "injected failure during {operation}"
            )));
        }
        Ok(())
    }

    fn user_listeners(&self, user: &UserId) -> Arc<Listeners<Snapshot>> {
        self.listeners
            .lock()
            .unwrap()
            .entry(user.clone())
            .or_insert_with(Listeners::new)
            .clone()
    }

    fn current_snapshot(&self, user: &UserId) -> Snapshot {
        self.users
            .lock()
            .unwrap()
            .get(user)
            .map(UserCollections::snapshot)
            .unwrap_or_default()
    }

    /// Fan the user's current snapshot out to their subscribers. The
    /// collections lock is released before listeners run.
    fn notify(&self, user: &UserId) {
        let snapshot = self.current_snapshot(user);
        let listeners = self.user_listeners(user);
        listeners.notify(&snapshot);
    }

    fn mutate<R>(
        &self,
        user: &UserId,
        operation: &str,
        f: impl FnOnce(&mut UserCollections) -> R,
    ) -> Result<R, StoreError> {
        self.check_failure(operation)?;
        let result = {
            let mut users = self.users.lock().unwrap();
            f(users.entry(user.clone()).or_default())
        };
        Ok(result)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, user: &UserId) -> Result<Snapshot, StoreError> {
        Ok(self.current_snapshot(user))
    }

    fn subscribe(&self, user: &UserId, listener: SnapshotListener) -> SubscriptionHandle {
        debug!("opening live query for user {user}");
        let snapshot = self.current_snapshot(user);
        listener(&snapshot);
        self.user_listeners(user).subscribe(listener)
    }

    fn add_income(&self, user: &UserId, draft: NewIncome) -> Result<EntryId, StoreError> {
        let id = EntryId::new(Uuid::new_v4().to_string());
        let entry = IncomeEntry {
            id: id.clone(),
            source: draft.source,
            amount: draft.amount,
            date: draft.date,
        };
        self.mutate(user, "add_income", |collections| {
            collections.incomes.push(entry);
        })?;
        self.notify(user);
        Ok(id)
    }

    fn add_expense(&self, user: &UserId, draft: NewExpense) -> Result<EntryId, StoreError> {
        let id = EntryId::new(Uuid::new_v4().to_string());
        let entry = ExpenseEntry {
            id: id.clone(),
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
        };
        self.mutate(user, "add_expense", |collections| {
            collections.expenses.push(entry);
        })?;
        self.notify(user);
        Ok(id)
    }

    fn delete_income(&self, user: &UserId, id: &EntryId) -> Result<(), StoreError> {
        let removed = self.mutate(user, "delete_income", |collections| {
            let before = collections.incomes.len();
            collections.incomes.retain(|entry| entry.id != *id);
            collections.incomes.len() != before
        })?;
        if removed {
            self.notify(user);
        } else {
            debug!("delete_income: no document with id {id} for user {user}");
        }
        Ok(())
    }

    fn delete_expense(&self, user: &UserId, id: &EntryId) -> Result<(), StoreError> {
        let removed = self.mutate(user, "delete_expense", |collections| {
            let before = collections.expenses.len();
            collections.expenses.retain(|entry| entry.id != *id);
            collections.expenses.len() != before
        })?;
        if removed {
            self.notify(user);
        } else {
            debug!("delete_expense: no document with id {id} for user {user}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn user(name: &str) -> UserId {
        UserId::new(name)
    }

    fn income(source: &str, date: &str) -> NewIncome {
        NewIncome::parse(source, "100", date).unwrap()
    }

    #[test]
    fn snapshots_are_ordered_date_descending_with_insertion_tiebreak() {
        let store = MemoryDocumentStore::new();
        let u = user("u1");
        store.add_income(&u, income("older", "2025-09-01")).unwrap();
        store.add_income(&u, income("newest", "2025-09-20")).unwrap();
        store.add_income(&u, income("tie-first", "2025-09-10")).unwrap();
        store.add_income(&u, income("tie-second", "2025-09-10")).unwrap();

        let snapshot = store.load(&u).unwrap();
        let sources: Vec<&str> = snapshot.incomes.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, ["newest", "tie-first", "tie-second", "older"]);
    }

    #[test]
    fn subscription_delivers_initial_state_and_every_change() {
        let store = MemoryDocumentStore::new();
        let u = user("u1");
        let (tx, rx) = mpsc::channel();
        let _sub = store.subscribe(
            &u,
            Box::new(move |snapshot| {
                tx.send(snapshot.clone()).unwrap();
            }),
        );

        assert!(rx.recv().unwrap().is_empty());

        let id = store.add_income(&u, income("Salary", "2025-09-01")).unwrap();
        assert_eq!(rx.recv().unwrap().incomes.len(), 1);

        store.delete_income(&u, &id).unwrap();
        assert!(rx.recv().unwrap().is_empty());
    }

    #[test]
    fn dropped_subscription_stops_callbacks() {
        let store = MemoryDocumentStore::new();
        let u = user("u1");
        let (tx, rx) = mpsc::channel();
        let sub = store.subscribe(
            &u,
            Box::new(move |snapshot| {
                tx.send(snapshot.clone()).unwrap();
            }),
        );
        rx.recv().unwrap();

        drop(sub);
        store.add_income(&u, income("Salary", "2025-09-01")).unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn collections_are_scoped_per_user() {
        let store = MemoryDocumentStore::new();
        let (tx, rx) = mpsc::channel();
        let _sub = store.subscribe(
            &user("u1"),
            Box::new(move |snapshot| {
                tx.send(snapshot.clone()).unwrap();
            }),
        );
        rx.recv().unwrap();

        store
            .add_income(&user("u2"), income("Elsewhere", "2025-09-01"))
            .unwrap();
        // u1's subscription never hears about u2's collections.
        assert!(rx.try_recv().is_err());
        assert!(store.load(&user("u1")).unwrap().is_empty());
    }

    #[test]
    fn injected_failure_rejects_the_operation_and_leaves_data_unchanged() {
        let store = MemoryDocumentStore::new();
        let u = user("u1");
        store.add_income(&u, income("Salary", "2025-09-01")).unwrap();

        store.fail_next_operation();
        let err = store.add_income(&u, income("Bonus", "2025-09-02")).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.load(&u).unwrap().incomes.len(), 1);

        // The switch is one-shot.
        store.add_income(&u, income("Bonus", "2025-09-02")).unwrap();
        assert_eq!(store.load(&u).unwrap().incomes.len(), 2);
    }

    #[test]
    fn delete_of_unknown_document_is_a_no_op() {
        let store = MemoryDocumentStore::new();
        let u = user("u1");
        store.add_income(&u, income("Salary", "2025-09-01")).unwrap();

        store.delete_income(&u, &EntryId::new("missing")).unwrap();
        assert_eq!(store.load(&u).unwrap().incomes.len(), 1);
    }
}
