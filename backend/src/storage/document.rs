//! The remote document store, modeled as an opaque capability.
//!
//! Collections are scoped per user (`users/{uid}/incomes` and
//! `users/{uid}/expenses`); the store assigns document ids, supports live
//! subscriptions ordered by date descending, and is the single owner of the
//! collections. [`super::RemoteStore`] adapts this capability to the
//! [`super::EntryStore`] interface for one signed-in user.

use shared::{EntryId, NewExpense, NewIncome, UserId};

use crate::error::StoreError;
use crate::storage::traits::{Snapshot, SnapshotListener};
use crate::subscription::SubscriptionHandle;

/// Opaque per-user document collection store.
///
/// Snapshots delivered by [`subscribe`](Self::subscribe) are ordered by date
/// descending, with insertion order as the tiebreak for equal dates.
pub trait DocumentStore: Send + Sync {
    /// Read the user's full current snapshot.
    fn load(&self, user: &UserId) -> Result<Snapshot, StoreError>;

    /// Open a live query over both of the user's collections. The listener
    /// receives the current snapshot immediately and again on every change,
    /// including changes made from elsewhere. The query runs until the
    /// returned handle is dropped.
    fn subscribe(&self, user: &UserId, listener: SnapshotListener) -> SubscriptionHandle;

    /// Append a document to `users/{uid}/incomes`; the store assigns the id.
    fn add_income(&self, user: &UserId, draft: NewIncome) -> Result<EntryId, StoreError>;

    /// Append a document to `users/{uid}/expenses`; the store assigns the id.
    fn add_expense(&self, user: &UserId, draft: NewExpense) -> Result<EntryId, StoreError>;

    /// Remove a document by id. Unknown ids are a no-op.
    fn delete_income(&self, user: &UserId, id: &EntryId) -> Result<(), StoreError>;

    /// Remove a document by id. Unknown ids are a no-op.
    fn delete_expense(&self, user: &UserId, id: &EntryId) -> Result<(), StoreError>;
}
