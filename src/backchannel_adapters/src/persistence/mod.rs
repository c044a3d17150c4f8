pub mod hashmap_revocation_store;
pub mod redis_revocation_store;

pub use hashmap_revocation_store::HashMapRevocationStore;
pub use redis_revocation_store::RedisRevocationStore;
