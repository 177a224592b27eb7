//! Command service between the presentation layer and the persistence
//! adapter.
//!
//! Validation happens here, before the store is contacted: a rejected draft
//! never mutates anything and surfaces as an inline form error, the one
//! user-visible surface both variants share. Store failures pass through so
//! the UI can offer a retry.

use std::sync::Arc;

use log::{debug, error};
use shared::{EntryDraft, EntryId, EntryKind};

use crate::error::BudgetError;
use crate::storage::{EntryStore, Snapshot, SnapshotListener};
use crate::subscription::SubscriptionHandle;

/// Issues add/delete commands against whichever persistence variant the app
/// was started with.
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        EntryService { store }
    }

    pub fn load(&self) -> Result<Snapshot, BudgetError> {
        Ok(self.store.load()?)
    }

    pub fn subscribe(&self, listener: SnapshotListener) -> SubscriptionHandle {
        self.store.subscribe(listener)
    }

    /// Validate and persist a draft. Validation failures block the command
    /// without contacting the store.
    pub fn add_item(&self, draft: EntryDraft) -> Result<EntryId, BudgetError> {
        let kind = draft.kind();
        let stored = match draft {
            EntryDraft::Income(draft) => {
                if let Err(err) = draft.validate() {
                    debug!("rejected income draft: {err}");
                    return Err(err.into());
                }
                self.store.add_income(draft)
            }
            EntryDraft::Expense(draft) => {
                if let Err(err) = draft.validate() {
                    debug!("rejected expense draft: {err}");
                    return Err(err.into());
                }
                self.store.add_expense(draft)
            }
        };

        stored.map_err(|err| {
            error!("failed to add {}: {err}", kind.label());
            err.into()
        })
    }

    /// Remove an entry by id from the named collection.
    pub fn delete_item(&self, kind: EntryKind, id: &EntryId) -> Result<(), BudgetError> {
        let result = match kind {
            EntryKind::Income => self.store.delete_income(id),
            EntryKind::Expense => self.store.delete_expense(id),
        };
        result.map_err(|err| {
            error!("failed to delete {} {id}: {err}", kind.label());
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryDocumentStore, RemoteStore};
    use shared::{NewExpense, NewIncome, UserId, ValidationError};

    fn service() -> EntryService {
        let docs = Arc::new(MemoryDocumentStore::new());
        let store = RemoteStore::new(docs, UserId::new("u1"));
        EntryService::new(Arc::new(store))
    }

    #[test]
    fn invalid_draft_is_rejected_without_mutation() {
        let service = service();
        let draft = EntryDraft::Expense(NewExpense {
            name: "".to_string(),
            ..NewExpense::parse("placeholder", "10", "2025-09-01", "Food").unwrap()
        });

        let err = service.add_item(draft).unwrap_err();
        assert!(matches!(
            err,
            BudgetError::Validation(ValidationError::EmptyName)
        ));
        assert!(service.load().unwrap().is_empty());
    }

    #[test]
    fn valid_draft_reaches_the_store() {
        let service = service();
        let draft = EntryDraft::Income(NewIncome::parse("Salary", "2500", "2025-09-01").unwrap());

        let id = service.add_item(draft).unwrap();
        let snapshot = service.load().unwrap();
        assert_eq!(snapshot.incomes.len(), 1);
        assert_eq!(snapshot.incomes[0].id, id);
    }

    #[test]
    fn delete_routes_to_the_right_collection() {
        let service = service();
        let income_id = service
            .add_item(EntryDraft::Income(
                NewIncome::parse("Salary", "2500", "2025-09-01").unwrap(),
            ))
            .unwrap();
        service
            .add_item(EntryDraft::Expense(
                NewExpense::parse("Rent", "1200", "2025-09-01", "Housing").unwrap(),
            ))
            .unwrap();

        // Same id, wrong kind: independent namespaces, nothing happens.
        service.delete_item(EntryKind::Expense, &income_id).unwrap();
        assert_eq!(service.load().unwrap().expenses.len(), 1);

        service.delete_item(EntryKind::Income, &income_id).unwrap();
        assert!(service.load().unwrap().incomes.is_empty());
    }
}
