//! Application state for the FieldTrack API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Carries the injected ledger store and the engine configuration; there
/// is no process-wide singleton anywhere in the crate.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    config: Arc<EngineConfig>,
}

impl AppState {
    /// Creates a new application state around a store and configuration.
    pub fn new(store: Arc<MemoryStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the ledger store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
