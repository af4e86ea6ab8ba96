//! redb-backed local storage
//!
//! Mirrors the browser's `localStorage`: one table of string keys, each
//! holding a JSON array, newest record first.
//!
//! # Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `gps_calc_history` | `Vec<SavedSimulation>` |
//! | `gps_planning_scenarios` | `Vec<PlanningScenario>` |
//! | `gps_clients` | `Vec<Client>` |
//! | `gps_weekly_metrics` | `Vec<WeeklyMetric>` |
//!
//! A missing key reads as an empty list. A value that no longer parses is
//! logged and also read as empty; the next write replaces it.
//!
//! # Durability
//!
//! Every update is a single write transaction (read, modify, write back,
//! commit), so a failed update leaves the stored list untouched.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use shared::models::{Client, PlanningScenario, SavedSimulation, WeeklyMetric};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for all persisted lists: key = storage key, value = JSON array
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("local_storage");

type ListTable<'txn> = redb::Table<'txn, &'static str, &'static [u8]>;

pub const HISTORY_KEY: &str = "gps_calc_history";
pub const SCENARIOS_KEY: &str = "gps_planning_scenarios";
pub const CLIENTS_KEY: &str = "gps_clients";
pub const METRICS_KEY: &str = "gps_weekly_metrics";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Serialization(_) => ErrorCode::StorageCorrupted,
            _ => ErrorCode::StorageError,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// A persisted record addressable by id
pub trait Record: Serialize + DeserializeOwned {
    fn record_id(&self) -> &str;
}

impl Record for SavedSimulation {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for PlanningScenario {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Client {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for WeeklyMetric {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Local list storage backed by redb
#[derive(Clone)]
pub struct SimulationStore {
    db: Arc<Database>,
}

impl SimulationStore {
    /// Open or create the store at the given path
    ///
    /// Parent directories are created as needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        tracing::debug!(path = %path.display(), "Store opened");
        Self::init(db)
    }

    /// Open an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Raw List Operations ==========

    /// Read the list under `key`
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        match table.get(key)? {
            Some(value) => Ok(decode_list(key, value.value())),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the list under `key`
    pub fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> StorageResult<()> {
        let bytes = serde_json::to_vec(items)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Read-modify-write the list under `key` in one transaction
    ///
    /// If `f` fails nothing is written.
    pub fn update_list<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StorageError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let outcome = {
            let mut table = txn
                .open_table(LOCAL_STORAGE_TABLE)
                .map_err(StorageError::from)?;
            let mut items: Vec<T> = get_list(&table, key)?;

            match f(&mut items) {
                Ok(result) => {
                    put_list(&mut table, key, &items)?;
                    Ok(result)
                }
                Err(e) => Err(e),
            }
        };

        match outcome {
            Ok(result) => {
                txn.commit().map_err(StorageError::from)?;
                Ok(result)
            }
            Err(e) => {
                txn.abort().map_err(StorageError::from)?;
                Err(e)
            }
        }
    }

    /// Insert a record at the front of the list
    pub fn prepend<T: Record>(&self, key: &str, record: &T) -> StorageResult<()>
    where
        T: Clone,
    {
        self.update_list(key, |items: &mut Vec<T>| {
            items.insert(0, record.clone());
            Ok::<_, StorageError>(())
        })
    }

    /// Replace the record with the same id in place, or prepend it
    pub fn upsert<T: Record + Clone>(&self, key: &str, record: &T) -> StorageResult<()> {
        self.update_list(key, |items: &mut Vec<T>| {
            match items
                .iter_mut()
                .find(|item| item.record_id() == record.record_id())
            {
                Some(existing) => *existing = record.clone(),
                None => items.insert(0, record.clone()),
            }
            Ok::<_, StorageError>(())
        })
    }

    /// Remove the record with `id`; returns whether it existed
    pub fn remove<T: Record>(&self, key: &str, id: &str) -> StorageResult<bool> {
        self.update_list(key, |items: &mut Vec<T>| {
            let before = items.len();
            items.retain(|item| item.record_id() != id);
            Ok::<_, StorageError>(items.len() != before)
        })
    }

    // ========== Typed Accessors ==========

    /// Saved simulations, newest first
    pub fn load_history(&self) -> StorageResult<Vec<SavedSimulation>> {
        self.read_list(HISTORY_KEY)
    }

    pub fn save_simulation(&self, simulation: &SavedSimulation) -> StorageResult<()> {
        self.prepend(HISTORY_KEY, simulation)
    }

    pub fn delete_simulation(&self, id: &str) -> StorageResult<bool> {
        self.remove::<SavedSimulation>(HISTORY_KEY, id)
    }

    /// Planning scenarios, newest first
    pub fn load_scenarios(&self) -> StorageResult<Vec<PlanningScenario>> {
        self.read_list(SCENARIOS_KEY)
    }

    pub fn save_scenario(&self, scenario: &PlanningScenario) -> StorageResult<()> {
        self.prepend(SCENARIOS_KEY, scenario)
    }

    pub fn delete_scenario(&self, id: &str) -> StorageResult<bool> {
        self.remove::<PlanningScenario>(SCENARIOS_KEY, id)
    }

    pub fn load_clients(&self) -> StorageResult<Vec<Client>> {
        self.read_list(CLIENTS_KEY)
    }

    pub fn save_client(&self, client: &Client) -> StorageResult<()> {
        self.upsert(CLIENTS_KEY, client)
    }

    pub fn load_metrics(&self) -> StorageResult<Vec<WeeklyMetric>> {
        self.read_list(METRICS_KEY)
    }

    pub fn save_metric(&self, metric: &WeeklyMetric) -> StorageResult<()> {
        self.upsert(METRICS_KEY, metric)
    }

    pub fn delete_metric(&self, id: &str) -> StorageResult<bool> {
        self.remove::<WeeklyMetric>(METRICS_KEY, id)
    }

    /// Remove a client together with its weekly metrics in one transaction
    pub fn delete_client(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(LOCAL_STORAGE_TABLE)?;
            let mut clients: Vec<Client> = get_list(&table, CLIENTS_KEY)?;
            let before = clients.len();
            clients.retain(|c| c.id != id);
            let removed = clients.len() != before;

            if removed {
                let mut metrics: Vec<WeeklyMetric> = get_list(&table, METRICS_KEY)?;
                metrics.retain(|m| m.client_id != id);
                put_list(&mut table, CLIENTS_KEY, &clients)?;
                put_list(&mut table, METRICS_KEY, &metrics)?;
            }
            removed
        };

        if removed {
            txn.commit()?;
        } else {
            txn.abort()?;
        }
        Ok(removed)
    }
}

fn get_list<T: DeserializeOwned>(table: &ListTable<'_>, key: &str) -> StorageResult<Vec<T>> {
    Ok(match table.get(key)? {
        Some(value) => decode_list(key, value.value()),
        None => Vec::new(),
    })
}

fn put_list<T: Serialize>(table: &mut ListTable<'_>, key: &str, items: &[T]) -> StorageResult<()> {
    let bytes = serde_json::to_vec(items)?;
    table.insert(key, bytes.as_slice())?;
    Ok(())
}

/// Parse a stored list, reading corrupt data as empty
fn decode_list<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Vec<T> {
    match serde_json::from_slice(bytes) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored list is malformed, reading as empty");
            Vec::new()
        }
    }
}
