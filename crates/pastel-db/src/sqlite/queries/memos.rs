use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use pastel_core::memo::{CreateMemo, Memo};

use super::super::{SqliteDatabase, SqliteResultExt};
use crate::DbError;

fn epoch_to_utc(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(column)?;
    let idx = row.as_ref().column_index(column)?;
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

fn row_to_memo(row: &Row) -> rusqlite::Result<Memo> {
    Ok(Memo {
        id: row.get("id")?,
        access_key: row.get("access_key")?,
        body: row.get("body")?,
        created_at: epoch_to_utc(row, "created_at")?,
        updated_at: epoch_to_utc(row, "updated_at")?,
    })
}

impl SqliteDatabase {
    pub fn insert_memo_sync(&self, input: &CreateMemo) -> Result<Memo, DbError> {
        self.with_conn(|conn| {
            let now = input.created_at.timestamp();
            conn.execute(
                "INSERT INTO memos (access_key, body, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![input.access_key, input.body, now, now],
            )
            .to_db()?;
            let id = conn.last_insert_rowid();
            debug!(id, access_key = %input.access_key, "inserted memo");
            conn.query_row("SELECT * FROM memos WHERE id = ?1", params![id], row_to_memo)
                .to_db()
        })
    }

    pub fn find_memo_by_key_sync(&self, access_key: &str) -> Result<Memo, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM memos WHERE access_key = ?1",
                params![access_key],
                row_to_memo,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("memo {access_key}"))
                }
                other => DbError::Internal(other.to_string()),
            })
        })
    }

    pub fn delete_memo_by_key_sync(&self, access_key: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let id: i64 = conn
                .query_row(
                    "SELECT id FROM memos WHERE access_key = ?1",
                    params![access_key],
                    |row| row.get(0),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => {
                        DbError::NotFound(format!("memo {access_key}"))
                    }
                    other => DbError::Internal(other.to_string()),
                })?;
            conn.execute("DELETE FROM memos WHERE id = ?1", params![id])
                .to_db()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pastel_core::memo::CreateMemo;

    use crate::{DbError, SqliteDatabase};

    #[test]
    fn test_memo_crud() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        let input = CreateMemo::new("hello", Utc::now()).unwrap();

        // Insert
        let memo = db.insert_memo_sync(&input).unwrap();
        assert_eq!(memo.access_key, input.access_key);
        assert_eq!(memo.body, "hello");
        assert_eq!(memo.created_at, input.created_at);
        assert_eq!(memo.updated_at, memo.created_at);

        // Find
        let found = db.find_memo_by_key_sync(&input.access_key).unwrap();
        assert_eq!(found.id, memo.id);
        assert_eq!(found.body, "hello");

        // Delete
        db.delete_memo_by_key_sync(&input.access_key).unwrap();
        let gone = db.find_memo_by_key_sync(&input.access_key).unwrap_err();
        assert!(matches!(gone, DbError::NotFound(_)));
    }

    #[test]
    fn duplicate_access_key_is_conflict() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        let input = CreateMemo::new("first", Utc::now()).unwrap();
        db.insert_memo_sync(&input).unwrap();

        let dup = CreateMemo {
            body: "second".into(),
            ..input.clone()
        };
        let err = db.insert_memo_sync(&dup).unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)), "got {err:?}");

        // Original row untouched
        let found = db.find_memo_by_key_sync(&input.access_key).unwrap();
        assert_eq!(found.body, "first");
    }

    #[test]
    fn delete_unknown_key_is_not_found() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        let err = db.delete_memo_by_key_sync(&"0".repeat(40)).unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }

    #[test]
    fn delete_leaves_other_memos() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        let a = CreateMemo::new("a", Utc::now()).unwrap();
        let b = CreateMemo::new("b", Utc::now()).unwrap();
        db.insert_memo_sync(&a).unwrap();
        db.insert_memo_sync(&b).unwrap();

        db.delete_memo_by_key_sync(&a.access_key).unwrap();
        assert_eq!(db.find_memo_by_key_sync(&b.access_key).unwrap().body, "b");
    }
}
