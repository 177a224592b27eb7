//! Remote persistence variant: the [`DocumentStore`] capability scoped to
//! one signed-in user.
//!
//! Constructed when a session becomes authenticated and dropped when it
//! ends, so every operation is implicitly scoped to `users/{uid}/...`. The
//! store owns the collections and assigns ids; the UI observes mutations
//! only through the subscription.

use std::sync::Arc;

use shared::{EntryId, NewExpense, NewIncome, UserId};

use crate::error::StoreError;
use crate::storage::document::DocumentStore;
use crate::storage::traits::{EntryStore, Snapshot, SnapshotListener};
use crate::subscription::SubscriptionHandle;

/// [`EntryStore`] over a remote document store, for one user.
pub struct RemoteStore {
    store: Arc<dyn DocumentStore>,
    user: UserId,
}

impl RemoteStore {
    pub fn new(store: Arc<dyn DocumentStore>, user: UserId) -> Self {
        RemoteStore { store, user }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }
}

impl EntryStore for RemoteStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        self.store.load(&self.user)
    }

    fn subscribe(&self, listener: SnapshotListener) -> SubscriptionHandle {
        self.store.subscribe(&self.user, listener)
    }

    fn add_income(&self, draft: NewIncome) -> Result<EntryId, StoreError> {
        self.store.add_income(&self.user, draft)
    }

    fn add_expense(&self, draft: NewExpense) -> Result<EntryId, StoreError> {
        self.store.add_expense(&self.user, draft)
    }

    fn delete_income(&self, id: &EntryId) -> Result<(), StoreError> {
        self.store.delete_income(&self.user, id)
    }

    fn delete_expense(&self, id: &EntryId) -> Result<(), StoreError> {
        self.store.delete_expense(&self.user, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryDocumentStore;
    use std::sync::mpsc;

    #[test]
    fn operations_stay_inside_the_scoped_user() {
        let docs = Arc::new(MemoryDocumentStore::new());
        let mine = RemoteStore::new(docs.clone(), UserId::new("u1"));
        let theirs = RemoteStore::new(docs.clone(), UserId::new("u2"));

        mine.add_income(NewIncome::parse("Salary", "2500", "2025-09-01").unwrap())
            .unwrap();

        assert_eq!(mine.load().unwrap().incomes.len(), 1);
        assert!(theirs.load().unwrap().is_empty());
    }

    #[test]
    fn subscription_observes_changes_made_elsewhere() {
        let docs = Arc::new(MemoryDocumentStore::new());
        let store = RemoteStore::new(docs.clone(), UserId::new("u1"));

        let (tx, rx) = mpsc::channel();
        let _sub = store.subscribe(Box::new(move |snapshot| {
            tx.send(snapshot.clone()).unwrap();
        }));
        rx.recv().unwrap();

        // Another client writing to the same user's collection.
        docs.add_income(
            &UserId::new("u1"),
            NewIncome::parse("Transfer", "50", "2025-09-03").unwrap(),
        )
        .unwrap();
        assert_eq!(rx.recv().unwrap().incomes.len(), 1);
    }
}
