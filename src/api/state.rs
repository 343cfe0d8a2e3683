//! Application state for the geofence validation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the record store and the engine policy configuration shared
/// across all request handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    config: Arc<EngineConfig>,
}

impl AppState {
    /// Creates a new application state with the given store and config.
    pub fn new(store: MemoryStore, config: EngineConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
