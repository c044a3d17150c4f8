use async_trait::async_trait;
use thiserror::Error;

// RevocationStore port trait and errors
#[derive(Debug, Error)]
pub enum RevocationStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PartialEq for RevocationStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DatabaseError(_), Self::DatabaseError(_)) => true,
        }
    }
}

/// Narrow key/value contract over the shared session-state store.
///
/// No transactions and no atomic multi-key writes: the two markers written
/// for a single logout token are independently actionable, so a crash
/// between them is acceptable.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RevocationStoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), RevocationStoreError>;
    async fn delete(&self, key: &str) -> Result<(), RevocationStoreError>;
}
