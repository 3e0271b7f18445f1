//! Session persistence
//!
//! The console keeps exactly one record across restarts: the logged-in
//! session, stored as JSON under a fixed key.
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `session` | `crm_user` | `Session` (JSON) | Current principal |

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::AppError;
use shared::models::Session;
use thiserror::Error;

/// Table for the session record: key = SESSION_KEY, value = JSON-serialized Session
const SESSION_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

/// Fixed key the session record lives under
pub const SESSION_KEY: &str = "crm_user";

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
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::database(err.to_string())
    }
}

/// Key-value collaborator holding the persisted session
pub trait SessionStore: Send + Sync {
    fn load(&self) -> StorageResult<Option<Session>>;
    fn save(&self, session: &Session) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

/// Session store backed by redb
#[derive(Clone)]
pub struct RedbSessionStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSessionStore").finish_non_exhaustive()
    }
}

impl RedbSessionStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SESSION_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl SessionStore for RedbSessionStore {
    fn load(&self) -> StorageResult<Option<Session>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;
        match table.get(SESSION_KEY)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> StorageResult<()> {
        let bytes = serde_json::to_vec(session)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.insert(SESSION_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.remove(SESSION_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Volatile session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> StorageResult<Option<Session>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, session: &Session) -> StorageResult<()> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
