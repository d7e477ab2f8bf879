use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::models::PortfolioState;

use super::{StateStore, StateStoreError};

/// Single-document JSON state store.
///
/// The whole portfolio lives in one pretty-printed JSON file. Saves go
/// through a sibling temp file followed by a rename, so an interrupted
/// write never leaves a truncated state behind.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "portfolio.json".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait::async_trait]
impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<PortfolioState, StateStoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StateStoreError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(err) => {
                return Err(StateStoreError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| StateStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, state: &PortfolioState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create state directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(state).context("Failed to serialize portfolio state")?;

        let temp = self.temp_path();
        fs::write(&temp, &content)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}
