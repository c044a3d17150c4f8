use std::sync::Arc;

use backchannel_core::{RevocationStore, RevocationStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Redis-backed revocation store.
///
/// Markers are written without a TTL: the consuming session middleware is
/// responsible for deleting markers it has acted on.
#[derive(Clone)]
pub struct RedisRevocationStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisRevocationStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RevocationStoreError> {
        let mut conn = self.conn.write().await;
        conn.get(key)
            .map_err(|e| RevocationStoreError::DatabaseError(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RevocationStoreError> {
        let mut conn = self.conn.write().await;
        conn.set(key, value)
            .map_err(|e| RevocationStoreError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), RevocationStoreError> {
        let mut conn = self.conn.write().await;
        conn.del(key)
            .map_err(|e| RevocationStoreError::DatabaseError(e.to_string()))
    }
}
