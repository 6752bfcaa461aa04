//! In-memory status cell.
//!
//! The service holds exactly one string value. It starts as [`DEFAULT_STATE`]
//! (or the configured initial value) and lives until the process exits.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// Status value at process start when nothing else is configured.
pub const DEFAULT_STATE: &str = "idle";

/// Shared handle to the single status value.
///
/// Clones share the same cell. Each read and each write takes the lock, so
/// concurrent writers resolve as last-write-wins in lock order.
#[derive(Debug, Clone)]
pub struct StatusHolder {
    state: Arc<RwLock<String>>,
}

impl StatusHolder {
    /// Create a holder with the given initial value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial.into())),
        }
    }

    /// Current status value.
    pub async fn get(&self) -> String {
        self.state.read().await.clone()
    }

    /// Overwrite the status and return the value now stored.
    ///
    /// Any string is accepted, the empty string included.
    pub async fn set(&self, new_state: impl Into<String>) -> String {
        let new_state = new_state.into();
        let mut guard = self.state.write().await;
        let previous = std::mem::replace(&mut *guard, new_state);
        debug!(from = %previous, to = %guard.as_str(), "status changed");
        guard.clone()
    }
}

impl Default for StatusHolder {
    fn default() -> Self {
        Self::new(DEFAULT_STATE)
    }
}
