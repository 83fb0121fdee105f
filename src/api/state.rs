//! Application state for the shift earnings API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::EngineResult;
use crate::ledger::{Ledger, StateStore};

/// Shared application state.
///
/// Handlers take the read lock for previews and reports and the write lock
/// for edits. Edits are persisted while the write lock is still held; the
/// file write itself goes through `tokio::fs`.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<RwLock<Ledger>>,
    store: Option<Arc<StateStore>>,
}

impl AppState {
    /// Creates a state that persists every edit through `store`.
    pub fn new(ledger: Ledger, store: StateStore) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            store: Some(Arc::new(store)),
        }
    }

    /// Creates a state that keeps edits in memory only.
    pub fn in_memory(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            store: None,
        }
    }

    /// Returns the shared ledger.
    pub fn ledger(&self) -> &RwLock<Ledger> {
        &self.ledger
    }

    /// Writes `ledger` to the state file, if this state has one.
    pub async fn persist(&self, ledger: &Ledger) -> EngineResult<()> {
        match &self.store {
            Some(store) => store.save(ledger).await,
            None => Ok(()),
        }
    }
}
