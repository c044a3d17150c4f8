use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backchannel_adapters::{
    HashMapRevocationStore, JwksKeyProvider, JwksLogoutVerifier, VerifierConfig,
};
use backchannel_core::{
    BACKCHANNEL_LOGOUT_EVENT, RevocationStore, RevocationStoreError,
};
use backchannel_service::LogoutService;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SIGNING_KEY_DER: &[u8] = include_bytes!("fixtures/rsa_key_1.der");
pub const SIGNING_KID: &str = "test-key-1";
pub const SIGNING_KEY_MODULUS: &str = "mh_Abxeqnu_QDoE-2Kbwj_qZOlhBx_5Q9CZnpRv208HQozMPqH8s46VNLw3KyK1XYb2_AikIalNjKr0mNml8r3csLJuhc2OCFfew7W4B77--V9uepOS3idkHAMyRTqFHX_f249ukO5q3_a34OtXpjR2CjzAHNETmy3HsTlzCV1XqYdt9RpvG-72vwPAkvDwBCrdEnztQuFrcyeDmarwWYGjB6fqdnd7AkOoqsOXuNsCeZslIJUSDa08bG1fx0r3DA_KFZXX6TDlSl0ID8c6XOhJis0UGiqzLXKJGCgypkhsobxV2wczExwo-DBalkFm9DJi7jQjCGWnwRFH4ESZHBw";

pub const JWKS_PATH: &str = "/.well-known/jwks.json";
pub const ISSUER: &str = "https://idp.test/";
pub const AUDIENCE: &str = "test-client";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub revocation_store: HashMapRevocationStore,
    // Held so the mock JWKS endpoint outlives the app.
    #[allow(dead_code)]
    pub jwks_server: MockServer,
}

pub async fn spawn_app() -> TestApp {
    let jwks_server = start_jwks_server().await;
    let revocation_store = HashMapRevocationStore::new();
    let address = spawn_service(&jwks_server, revocation_store.clone()).await;

    TestApp {
        address,
        http_client: reqwest::Client::new(),
        revocation_store,
        jwks_server,
    }
}

/// App whose store rejects every write, simulating a store outage.
pub async fn spawn_app_with_broken_store() -> TestApp {
    let jwks_server = start_jwks_server().await;
    let address = spawn_service(&jwks_server, FailingRevocationStore).await;

    TestApp {
        address,
        http_client: reqwest::Client::new(),
        revocation_store: HashMapRevocationStore::new(),
        jwks_server,
    }
}

async fn start_jwks_server() -> MockServer {
    let jwks_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": SIGNING_KID,
                "n": SIGNING_KEY_MODULUS,
                "e": "AQAB"
            }]
        })))
        .mount(&jwks_server)
        .await;
    jwks_server
}

async fn spawn_service<R>(jwks_server: &MockServer, revocation_store: R) -> String
where
    R: RevocationStore + Clone + 'static,
{
    let key_provider = Arc::new(
        JwksKeyProvider::new(
            format!("{}{}", jwks_server.uri(), JWKS_PATH),
            Duration::from_secs(5),
        )
        .unwrap(),
    );
    let verifier = JwksLogoutVerifier::new(
        key_provider,
        VerifierConfig {
            issuer: ISSUER.to_string(),
            audience: AUDIENCE.to_string(),
            max_token_age: Duration::from_secs(120),
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    let service = LogoutService::new(verifier, revocation_store, false);
    tokio::spawn(service.run_standalone(listener));

    address
}

impl TestApp {
    pub async fn post_logout_token(&self, logout_token: Option<&str>) -> reqwest::Response {
        let mut form: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = logout_token {
            form.push(("logout_token", token));
        }
        self.http_client
            .post(format!("{}/backchannel-logout", self.address))
            .form(&form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Mint a logout token signed with the test key served by the mock JWKS
/// endpoint. `mutate` edits the conforming claim set before signing.
pub fn mint_logout_token(mutate: impl FnOnce(&mut serde_json::Value)) -> String {
    let now = Utc::now().timestamp();
    let mut claims = serde_json::json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + 120,
        "sub": "user-123",
        "sid": "session-abc",
        "events": { BACKCHANNEL_LOGOUT_EVENT: {} },
        "jti": "jwt-id-1"
    });
    mutate(&mut claims);

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(SIGNING_KID.to_string());
    encode(&header, &claims, &EncodingKey::from_rsa_der(SIGNING_KEY_DER)).unwrap()
}

pub fn remove_claim(claims: &mut serde_json::Value, name: &str) {
    claims.as_object_mut().unwrap().remove(name);
}

#[derive(Clone)]
pub struct FailingRevocationStore;

#[async_trait]
impl RevocationStore for FailingRevocationStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, RevocationStoreError> {
        Err(RevocationStoreError::DatabaseError(
            "connection refused".to_string(),
        ))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), RevocationStoreError> {
        Err(RevocationStoreError::DatabaseError(
            "connection refused".to_string(),
        ))
    }

    async fn delete(&self, _key: &str) -> Result<(), RevocationStoreError> {
        Err(RevocationStoreError::DatabaseError(
            "connection refused".to_string(),
        ))
    }
}
