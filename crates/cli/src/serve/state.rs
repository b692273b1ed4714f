//! Application state shared across request handlers.

use std::sync::Arc;

use activateflow_storage::FunnelStore;

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// Snapshot store, owned for the process lifetime.
    pub(crate) store: Arc<dyn FunnelStore>,
}
