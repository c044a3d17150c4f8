use std::sync::Arc;

use axum::{Router, routing::post};
use backchannel_application::BackchannelLogoutUseCase;
use backchannel_axum::{BackchannelLogoutState, backchannel_logout};
use backchannel_core::{LogoutTokenVerifier, RevocationStore};
use redis::Connection;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The back-channel logout service: the single HTTP endpoint providers
/// deliver logout tokens to.
pub struct LogoutService {
    router: Router,
}

impl LogoutService {
    /// Create a new LogoutService with the provided verifier and store
    ///
    /// # Arguments
    /// * `verifier` - Logout token verifier (must be Clone)
    /// * `revocation_store` - Store the revocation markers are written to
    ///   (must be Clone)
    /// * `diagnostics` - Include internal error detail in rejection bodies;
    ///   off in production
    ///
    /// # Note on Architecture
    /// Verifier and store implement Clone via internal Arc for thread-safe
    /// sharing; each inbound token is handled by an independent task.
    pub fn new<V, R>(verifier: V, revocation_store: R, diagnostics: bool) -> Self
    where
        V: LogoutTokenVerifier + Clone + 'static,
        R: RevocationStore + Clone + 'static,
    {
        let state = BackchannelLogoutState {
            use_case: BackchannelLogoutUseCase::new(verifier, revocation_store),
            diagnostics,
        };

        let router = Router::new()
            .route("/backchannel-logout", post(backchannel_logout::<V, R>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the LogoutService into a router that can be nested into
    /// another application
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the logout service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!(
            "Back-channel logout service listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, router).await
    }
}

pub fn get_redis_client(redis_hostname: String) -> redis::RedisResult<redis::Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

/// Open a Redis connection shared behind a lock, ready to hand to
/// [`RedisRevocationStore`](backchannel_adapters::RedisRevocationStore).
pub fn configure_redis(redis_hostname: String) -> redis::RedisResult<Arc<RwLock<Connection>>> {
    let client = get_redis_client(redis_hostname)?;
    let conn = client.get_connection()?;
    Ok(Arc::new(RwLock::new(conn)))
}
