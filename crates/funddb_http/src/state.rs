//! Shared handler state.

use crate::error::HttpError;
use funddb_core::{RepoResult, Store};
use rusqlite::Connection;

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs one store operation on the blocking pool and waits for it.
    pub async fn run<T, F>(&self, op: F) -> Result<T, HttpError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || store.with_conn(op)).await?;
        Ok(result?)
    }
}
