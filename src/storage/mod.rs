mod json_file;
mod memory;

pub use json_file::JsonStateStore;
pub use memory::MemoryStateStore;

use std::path::PathBuf;

use anyhow::Result;

use crate::models::PortfolioState;

/// Load failures, kept apart so the caller can report a missing file
/// differently from a corrupt one. Both are fatal: without a valid starting
/// state there is nothing to update.
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("state file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("state file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read state file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistence for the whole portfolio state, consumed and rewritten once
/// per run.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<PortfolioState, StateStoreError>;
    async fn save(&self, state: &PortfolioState) -> Result<()>;
}
