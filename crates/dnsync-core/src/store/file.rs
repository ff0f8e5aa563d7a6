// # File State Store
//
// File-based implementation of StateStore.
//
// Each key maps to one `<key>.json` file under a state directory. Writes go
// through a temporary file followed by a rename so a crash mid-write never
// leaves a half-written artifact behind. A missing file loads as an empty
// object; unreadable or corrupt JSON is an error and surfaces at the run
// boundary.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::traits::StateStore;

/// File-based state store
///
/// # Example
///
/// ```rust,no_run
/// use dnsync_core::store::FileStore;
/// use dnsync_core::traits::StateStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStore::new("/var/lib/dnsync").await?;
///     store.save("internal", &serde_json::json!({})).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at a directory, creating it if needed
    pub async fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir).await.map_err(|e| {
            Error::state_store(format!(
                "failed to create state directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are artifact names, not paths.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(Error::state_store(format!("invalid store key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self, key: &str) -> Result<serde_json::Value> {
        let path = self.path_for(key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!("no stored value for '{}', starting empty", key);
            return Ok(serde_json::json!({}));
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            Error::state_store(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::state_store(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value)?;

        // Write to a temporary file first, then rename into place.
        let mut temp_path = path.clone();
        temp_path.set_extension("tmp");

        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::state_store(format!(
                    "failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::state_store(format!(
                    "failed to write temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::state_store(format!(
                    "failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        fs::rename(&temp_path, &path).await.map_err(|e| {
            Error::state_store(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })?;

        tracing::trace!("saved '{}' to {}", key, path.display());
        Ok(())
    }
}
