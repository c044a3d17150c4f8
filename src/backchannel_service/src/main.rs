use std::sync::Arc;
use std::time::Duration;

use backchannel_adapters::config::constants;
use backchannel_adapters::{
    JwksKeyProvider, JwksLogoutVerifier, RedisRevocationStore, Settings, VerifierConfig,
};
use backchannel_service::{LogoutService, configure_redis, tracing::init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    init_tracing()?;

    let settings = Settings::load()?;

    let redis_conn = configure_redis(settings.redis.host_name.clone())?;
    let revocation_store = RedisRevocationStore::new(redis_conn);

    let key_provider = Arc::new(JwksKeyProvider::new(
        settings.oidc.jwks_url(),
        Duration::from_secs(constants::KEY_FETCH_TIMEOUT_SECONDS),
    )?);
    let verifier = JwksLogoutVerifier::new(
        key_provider,
        VerifierConfig {
            issuer: settings.oidc.issuer.clone(),
            audience: settings.oidc.client_id.clone(),
            max_token_age: settings.oidc.max_token_age(),
        },
    );

    let listener = TcpListener::bind(&settings.application.address).await?;
    LogoutService::new(verifier, revocation_store, settings.application.diagnostics)
        .run_standalone(listener)
        .await?;

    Ok(())
}
