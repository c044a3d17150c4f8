use std::collections::HashMap;
use std::sync::Arc;

use backchannel_core::{RevocationStore, RevocationStoreError};
use tokio::sync::RwLock;

/// In-memory revocation store for tests and single-process deployments.
#[derive(Default, Clone)]
pub struct HashMapRevocationStore {
    markers: Arc<RwLock<HashMap<String, String>>>,
}

impl HashMapRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every marker currently held; test helper.
    pub async fn all_markers(&self) -> HashMap<String, String> {
        self.markers.read().await.clone()
    }
}

#[async_trait::async_trait]
impl RevocationStore for HashMapRevocationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RevocationStoreError> {
        Ok(self.markers.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RevocationStoreError> {
        self.markers
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RevocationStoreError> {
        self.markers.write().await.remove(key);
        Ok(())
    }
}
