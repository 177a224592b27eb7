//! Local persistence variant: a durable key-value snapshot on disk.
//!
//! Two JSON files, keyed `budgetIncomes` and `budgetExpenses`, each holding a
//! serialized array of entries. Reads fail open: a missing or unparseable
//! file yields the default seed list. Every mutation persists the full
//! updated collection synchronously (atomic temp-file rename) and then
//! notifies subscribers with the new snapshot.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Category, EntryId, ExpenseEntry, IncomeEntry, NewExpense, NewIncome};

use crate::error::StoreError;
use crate::storage::traits::{EntryStore, Snapshot, SnapshotListener};
use crate::subscription::{Listeners, SubscriptionHandle};

const INCOMES_KEY: &str = "budgetIncomes";
const EXPENSES_KEY: &str = "budgetExpenses";

/// Durable local store backed by per-key JSON files in one directory.
pub struct LocalStore {
    dir: PathBuf,
    /// Monotonic id source, seeded from the epoch so ids stay unique across
    /// restarts. A plain counter, so two adds in the same millisecond can
    /// never collide.
    next_id: AtomicU64,
    listeners: Arc<Listeners<Snapshot>>,
}

impl LocalStore {
    /// Open (or create) a store rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let epoch_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(LocalStore {
            dir,
            next_id: AtomicU64::new(epoch_millis),
            listeners: Listeners::new(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn assign_id(&self) -> EntryId {
        EntryId::new(self.next_id.fetch_add(1, Ordering::Relaxed).to_string())
    }

    /// Read one collection, falling back to its seed when the file is
    /// missing or does not parse. The failure is logged, never reported.
    fn read_collection<T: DeserializeOwned>(&self, key: &str, seed: fn() -> Vec<T>) -> Vec<T> {
        let path = self.key_path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no stored value for {key}, using seed list");
                return seed();
            }
            Err(err) => {
                warn!("failed to read {}: {err}, using seed list", path.display());
                return seed();
            }
        };

        match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("stored value for {key} did not parse: {err}, using seed list");
                seed()
            }
        }
    }

    /// Persist one collection atomically: write to a temp file, then rename
    /// over the real one.
    fn write_collection<T: Serialize>(&self, key: &str, entries: &[T]) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            incomes: self.read_collection(INCOMES_KEY, seed_incomes),
            expenses: self.read_collection(EXPENSES_KEY, seed_expenses),
        }
    }
}

impl EntryStore for LocalStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        Ok(self.snapshot())
    }

    fn subscribe(&self, listener: SnapshotListener) -> SubscriptionHandle {
        // Parity with the remote variant: deliver the current state up front.
        let snapshot = self.snapshot();
        listener(&snapshot);
        self.listeners.subscribe(listener)
    }

    fn add_income(&self, draft: NewIncome) -> Result<EntryId, StoreError> {
        let mut incomes = self.read_collection(INCOMES_KEY, seed_incomes);
        let id = self.assign_id();
        incomes.push(IncomeEntry {
            id: id.clone(),
            source: draft.source,
            amount: draft.amount,
            date: draft.date,
        });
        self.write_collection(INCOMES_KEY, &incomes)?;
        self.notify();
        Ok(id)
    }

    fn add_expense(&self, draft: NewExpense) -> Result<EntryId, StoreError> {
        let mut expenses = self.read_collection(EXPENSES_KEY, seed_expenses);
        let id = self.assign_id();
        expenses.push(ExpenseEntry {
            id: id.clone(),
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
        });
        self.write_collection(EXPENSES_KEY, &expenses)?;
        self.notify();
        Ok(id)
    }

    fn delete_income(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut incomes = self.read_collection(INCOMES_KEY, seed_incomes);
        let before = incomes.len();
        incomes.retain(|entry| entry.id != *id);
        if incomes.len() == before {
            debug!("delete_income: no entry with id {id}");
            return Ok(());
        }
        self.write_collection(INCOMES_KEY, &incomes)?;
        self.notify();
        Ok(())
    }

    fn delete_expense(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut expenses = self.read_collection(EXPENSES_KEY, seed_expenses);
        let before = expenses.len();
        expenses.retain(|entry| entry.id != *id);
        if expenses.len() == before {
            debug!("delete_expense: no entry with id {id}");
            return Ok(());
        }
        self.write_collection(EXPENSES_KEY, &expenses)?;
        self.notify();
        Ok(())
    }
}

fn seed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid seed date")
}

fn seed_incomes() -> Vec<IncomeEntry> {
    vec![IncomeEntry {
        id: EntryId::new("seed-income"),
        source: "Salary".to_string(),
        amount: Decimal::from(2500),
        date: seed_date(),
    }]
}

fn seed_expenses() -> Vec<ExpenseEntry> {
    vec![ExpenseEntry {
        id: EntryId::new("seed-expense"),
        name: "Rent".to_string(),
        amount: Decimal::from(1200),
        date: seed_date(),
        category: Category::Housing,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        (dir, store)
    }

    fn salary_draft() -> NewIncome {
        NewIncome::parse("Freelance", "300", "2025-09-10").unwrap()
    }

    #[test]
    fn load_returns_seed_lists_when_nothing_is_stored() {
        let (_dir, store) = store();
        let snapshot = store.load().unwrap();

        assert_eq!(snapshot.incomes.len(), 1);
        assert_eq!(snapshot.incomes[0].source, "Salary");
        assert_eq!(snapshot.incomes[0].amount, dec!(2500));
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].category, Category::Housing);
    }

    #[test]
    fn load_fails_open_to_seeds_on_corrupt_file() {
        let (dir, store) = store();
        fs::write(dir.path().join("budgetIncomes.json"), "not json at all").unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.incomes.len(), 1);
        assert_eq!(snapshot.incomes[0].source, "Salary");
    }

    #[test]
    fn add_persists_and_survives_reopen() {
        let (dir, store) = store();
        let id = store.add_income(salary_draft()).unwrap();

        // A fresh store over the same directory sees the written file.
        let reopened = LocalStore::new(dir.path()).unwrap();
        let snapshot = reopened.load().unwrap();
        assert_eq!(snapshot.incomes.len(), 2);
        assert!(snapshot.incomes.iter().any(|e| e.id == id));
    }

    #[test]
    fn add_then_delete_restores_the_prior_collection() {
        let (_dir, store) = store();
        let before = store.load().unwrap();

        let id = store.add_income(salary_draft()).unwrap();
        assert_eq!(store.load().unwrap().incomes.len(), before.incomes.len() + 1);

        store.delete_income(&id).unwrap();
        let after = store.load().unwrap();
        assert_eq!(after.incomes, before.incomes);
    }

    #[test]
    fn delete_of_unknown_id_is_a_no_op() {
        let (_dir, store) = store();
        let before = store.load().unwrap();
        store.delete_income(&EntryId::new("no-such-id")).unwrap();
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn assigned_ids_are_unique_within_a_burst() {
        let (_dir, store) = store();
        let mut ids = Vec::new();
        for _ in 0..10 {
            ids.push(store.add_income(salary_draft()).unwrap());
        }
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let (_dir, store) = store();
        let (tx, rx) = mpsc::channel();
        let sub = store.subscribe(Box::new(move |snapshot| {
            tx.send(snapshot.clone()).unwrap();
        }));

        // Initial snapshot on subscribe.
        assert_eq!(rx.recv().unwrap().incomes.len(), 1);

        let id = store.add_income(salary_draft()).unwrap();
        assert_eq!(rx.recv().unwrap().incomes.len(), 2);

        store.delete_income(&id).unwrap();
        assert_eq!(rx.recv().unwrap().incomes.len(), 1);

        drop(sub);
        store.add_income(salary_draft()).unwrap();
        assert!(rx.try_recv().is_err());
    }
}
