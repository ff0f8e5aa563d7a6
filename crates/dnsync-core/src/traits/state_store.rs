// # State Store Trait
//
// Defines the interface for persisting the run artifacts as opaque JSON
// blobs keyed by name.
//
// ## Contract
//
// - `load` of an absent key returns an empty JSON object; absence is not an
//   error condition.
// - `save` replaces the stored value for a key in full, last writer wins.
//   Merging (the update history grows across runs) is the engine's job, not
//   the store's.
//
// ## Implementations
//
// - File-based: one `<key>.json` per key, atomic writes
// - In-memory: for tests and embedding

use async_trait::async_trait;

use crate::error::Result;

/// Trait for state store implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the value stored under a key
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: the stored JSON value, or `{}` when the key is absent
    /// - `Err(Error)`: storage error (unreadable or corrupt data)
    async fn load(&self, key: &str) -> Result<serde_json::Value>;

    /// Replace the value stored under a key
    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<()>;
}
