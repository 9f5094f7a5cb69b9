pub mod sqlite;

use std::path::PathBuf;

use async_trait::async_trait;
use pastel_core::memo::{CreateMemo, Memo};
use thiserror::Error;

pub use sqlite::SqliteDatabase;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the memo store lives.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub sqlite_path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("pastel.db"),
        }
    }
}

/// Storage operations over the `memos` table.
///
/// Handlers hold an `Arc<dyn Database>`, so implementations must be safe to
/// share across request tasks.
#[async_trait]
pub trait Database: Send + Sync {
    /// Insert a new memo. A duplicate access key yields `DbError::Conflict`.
    async fn insert_memo(&self, input: &CreateMemo) -> Result<Memo, DbError>;

    async fn find_memo_by_key(&self, access_key: &str) -> Result<Memo, DbError>;

    /// Delete a memo, returning `DbError::NotFound` if the key is unknown.
    async fn delete_memo_by_key(&self, access_key: &str) -> Result<(), DbError>;
}
