//! In-memory state store for testing.

use anyhow::Result;
use tokio::sync::Mutex;

use crate::models::PortfolioState;

use super::{StateStore, StateStoreError};

/// Holds the state in memory; `save` replaces it wholesale, like the file
/// store replaces the file.
pub struct MemoryStateStore {
    state: Mutex<PortfolioState>,
}

impl MemoryStateStore {
    pub fn new(state: PortfolioState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Current contents, as the next `load` would see them.
    pub async fn snapshot(&self) -> PortfolioState {
        self.state.lock().await.clone()
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new(PortfolioState::default())
    }
}

#[async_trait::async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<PortfolioState, StateStoreError> {
        Ok(self.state.lock().await.clone())
    }

    async fn save(&self, state: &PortfolioState) -> Result<()> {
        *self.state.lock().await = state.clone();
        Ok(())
    }
}
