//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The store sits behind a single async mutex;
/// handlers keep the guard for the whole read-modify-save sequence.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Mutex<Store>,
}

impl AppState {
    /// Create a new application state around a loaded store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(store),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the store mutex.
    #[must_use]
    pub fn store(&self) -> &Mutex<Store> {
        &self.inner.store
    }
}
