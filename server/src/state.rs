use std::sync::Arc;

use printshop::{MemoryJobStore, PrintJobRepository, PrintService, ServerConfig};

/// Shared application state, built once at startup and handed to every handler.
pub struct AppState {
    pub service: PrintService,
    pub config: ServerConfig,
}

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Self::with_store(config, Arc::new(MemoryJobStore::new()))
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn PrintJobRepository>) -> Arc<Self> {
        Arc::new(Self {
            service: PrintService::new(store),
            config,
        })
    }
}
