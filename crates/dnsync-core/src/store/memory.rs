// # Memory State Store
//
// In-memory implementation of StateStore. Nothing survives the process;
// useful for tests and for embedding the engine where persistence is
// handled elsewhere.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::traits::StateStore;

/// In-memory state store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<serde_json::Value> {
        let guard = self.inner.read().await;
        Ok(guard
            .get(key)
            .cloned()
            .unwrap_or_else(|| serde_json::json!({})))
    }

    async fn save(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.insert(key.to_string(), value.clone());
        Ok(())
    }
}
