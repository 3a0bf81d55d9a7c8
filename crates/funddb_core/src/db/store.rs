//! Explicitly owned store handle shared by request handlers.
//!
//! # Invariants
//! - Exactly one SQLite connection per `Store`; statements are serialized.
//! - The connection closes when the last clone of the `Store` is dropped.
//! - A panic inside `with_conn` does not disable the store: open transactions
//!   roll back on unwind, so the lock is recovered and reused.

use super::{open_db, open_db_in_memory, DbResult};
use log::warn;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Cloneable handle over one migrated connection.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens and migrates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// Blocks until the connection is free.
    pub fn with_conn<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E> {
        let guard = self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("event=store_lock module=db status=recovered reason=poisoned");
            self.conn.clear_poison();
            poisoned.into_inner()
        });
        f(&*guard)
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::db::DbResult;

    #[test]
    fn clones_share_one_connection() {
        let store = Store::open_in_memory().unwrap();
        let other = store.clone();

        store
            .with_conn(|conn| -> DbResult<()> {
                conn.execute("INSERT INTO campaigns (pda) VALUES ('shared');", [])?;
                Ok(())
            })
            .unwrap();

        let count: i64 = other
            .with_conn(|conn| -> DbResult<i64> {
                Ok(conn.query_row("SELECT COUNT(*) FROM campaigns;", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn store_stays_usable_after_panic_in_operation() {
        let store = Store::open_in_memory().unwrap();
        store
            .with_conn(|conn| -> DbResult<()> {
                conn.execute("INSERT INTO campaigns (pda) VALUES ('kept');", [])?;
                Ok(())
            })
            .unwrap();

        let panicking = store.clone();
        let joined = std::thread::spawn(move || {
            panicking
                .with_conn(|conn| -> DbResult<()> {
                    let tx = conn.unchecked_transaction()?;
                    tx.execute("INSERT INTO campaigns (pda) VALUES ('lost');", [])?;
                    panic!("abort mid-transaction");
                })
                .ok();
        })
        .join();
        assert!(joined.is_err());

        let pdas: Vec<String> = store
            .with_conn(|conn| -> DbResult<Vec<String>> {
                let mut stmt = conn.prepare("SELECT pda FROM campaigns ORDER BY id;")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
            })
            .unwrap();
        assert_eq!(pdas, vec!["kept".to_string()]);
    }
}
