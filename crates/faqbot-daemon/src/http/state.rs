//! Shared state for the HTTP server.
//!
//! Wraps the FAQ store and auth configuration needed by HTTP handlers.
//! The store sits behind a mutex so each command's mutate-and-persist step
//! runs as one unit even with concurrent connections.

use std::sync::Mutex;

use tokio::sync::oneshot;

use faqbot_core::FaqStore;

/// Shared state available to all HTTP handlers.
pub struct AppState {
    store: Mutex<FaqStore>,
    /// Bearer token required for mutating commands. `None` disables auth.
    auth_token: Option<String>,
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl AppState {
    pub fn new(
        store: FaqStore,
        auth_token: Option<String>,
        shutdown_tx: oneshot::Sender<()>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            auth_token,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
        }
    }

    /// Run a closure against the store while holding the lock.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut FaqStore) -> T) -> T {
        let mut store = self.store.lock().unwrap();
        f(&mut store)
    }

    /// Validate a presented token against the configured one.
    ///
    /// When no token is configured, all requests pass.
    pub fn validate_token(&self, token: Option<&str>) -> bool {
        match &self.auth_token {
            None => true,
            Some(expected) => token == Some(expected.as_str()),
        }
    }

    /// Ask the server to shut down. Subsequent calls are no-ops.
    pub fn request_shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
