pub mod logout_service;
pub mod tracing;

pub use logout_service::{LogoutService, configure_redis, get_redis_client};
