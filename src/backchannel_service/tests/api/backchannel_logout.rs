use backchannel_application::SessionRevocationCheck;
use backchannel_core::{session_logout_key, user_logout_key};

use crate::helpers::{mint_logout_token, remove_claim, spawn_app, spawn_app_with_broken_store};

#[tokio::test]
async fn test_valid_token_with_sid_records_a_session_marker() {
    let app = spawn_app().await;
    let token = mint_logout_token(|claims| remove_claim(claims, "sub"));

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let markers = app.revocation_store.all_markers().await;
    assert_eq!(
        markers.get(&session_logout_key("session-abc")).map(String::as_str),
        Some("true")
    );
    assert_eq!(markers.len(), 1);
}

#[tokio::test]
async fn test_valid_token_with_sub_records_a_user_marker() {
    let app = spawn_app().await;
    let token = mint_logout_token(|claims| remove_claim(claims, "sid"));

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let markers = app.revocation_store.all_markers().await;
    assert_eq!(
        markers.get(&user_logout_key("user-123")).map(String::as_str),
        Some("true")
    );
    assert_eq!(markers.len(), 1);
}

#[tokio::test]
async fn test_token_naming_both_records_both_markers() {
    let app = spawn_app().await;
    let token = mint_logout_token(|_| {});

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let markers = app.revocation_store.all_markers().await;
    assert!(markers.contains_key(&session_logout_key("session-abc")));
    assert!(markers.contains_key(&user_logout_key("user-123")));
}

#[tokio::test]
async fn test_missing_token_field_is_a_400() {
    let app = spawn_app().await;

    let response = app.post_logout_token(None).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "Need logout token");
}

#[tokio::test]
async fn test_token_without_sub_and_sid_is_rejected_without_a_write() {
    let app = spawn_app().await;
    let token = mint_logout_token(|claims| {
        remove_claim(claims, "sub");
        remove_claim(claims, "sid");
    });

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Logout token must contain either sub claim or sid claim, or both"
    );
    assert!(app.revocation_store.all_markers().await.is_empty());
}

#[tokio::test]
async fn test_token_without_the_logout_event_is_rejected() {
    let app = spawn_app().await;

    for mutate in [
        (|claims: &mut serde_json::Value| remove_claim(claims, "events")) as fn(&mut _),
        |claims| {
            claims["events"] =
                serde_json::json!({ "http://schemas.openid.net/event/other": {} });
        },
    ] {
        let token = mint_logout_token(mutate);
        let response = app.post_logout_token(Some(&token)).await;

        assert_eq!(response.status().as_u16(), 400);
        assert_eq!(
            response.text().await.unwrap(),
            "Logout token must contain events claim with correct schema"
        );
    }
    assert!(app.revocation_store.all_markers().await.is_empty());
}

#[tokio::test]
async fn test_otherwise_valid_token_with_a_nonce_is_rejected() {
    let app = spawn_app().await;
    let token = mint_logout_token(|claims| {
        claims["nonce"] = serde_json::json!("n-0S6_WzA2Mj");
    });

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Logout token must not contain a nonce claim"
    );
    assert!(app.revocation_store.all_markers().await.is_empty());
}

#[tokio::test]
async fn test_stale_token_is_rejected() {
    let app = spawn_app().await;
    let now = chrono::Utc::now().timestamp();
    let token = mint_logout_token(|claims| {
        claims["iat"] = serde_json::json!(now - 600);
        claims["exp"] = serde_json::json!(now + 600);
    });

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Logout token is expired or older than the freshness window"
    );
}

#[tokio::test]
async fn test_token_signed_with_an_unknown_key_is_rejected() {
    let app = spawn_app().await;
    let token = {
        // Valid claims, but a kid the provider never published.
        use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
        let now = chrono::Utc::now().timestamp();
        let claims = serde_json::json!({
            "iss": crate::helpers::ISSUER,
            "aud": crate::helpers::AUDIENCE,
            "iat": now,
            "exp": now + 120,
            "sid": "session-abc",
            "events": { backchannel_core::BACKCHANNEL_LOGOUT_EVENT: {} }
        });
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some("rotated-away".to_string());
        encode(
            &header,
            &claims,
            &EncodingKey::from_rsa_der(crate::helpers::SIGNING_KEY_DER),
        )
        .unwrap()
    };

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.text().await.unwrap(),
        "Logout token signature could not be verified"
    );
}

#[tokio::test]
async fn test_replayed_token_is_idempotent() {
    let app = spawn_app().await;
    let token = mint_logout_token(|_| {});

    let first = app.post_logout_token(Some(&token)).await;
    assert_eq!(first.status().as_u16(), 200);
    let markers_after_first = app.revocation_store.all_markers().await;

    let second = app.post_logout_token(Some(&token)).await;
    assert_eq!(second.status().as_u16(), 200);
    let markers_after_second = app.revocation_store.all_markers().await;

    assert_eq!(markers_after_first, markers_after_second);
}

#[tokio::test]
async fn test_concurrent_duplicate_deliveries_both_succeed() {
    let app = spawn_app().await;
    let token = mint_logout_token(|_| {});

    let (first, second) = tokio::join!(
        app.post_logout_token(Some(&token)),
        app.post_logout_token(Some(&token)),
    );

    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 200);

    let markers = app.revocation_store.all_markers().await;
    assert_eq!(markers.len(), 2);
}

#[tokio::test]
async fn test_store_outage_is_a_500_not_a_false_success() {
    let app = spawn_app_with_broken_store().await;
    let token = mint_logout_token(|_| {});

    let response = app.post_logout_token(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.text().await.unwrap(), "Logout was not recorded");
}

#[tokio::test]
async fn test_session_middleware_sees_and_clears_the_markers() {
    let app = spawn_app().await;
    let token = mint_logout_token(|_| {});
    assert_eq!(app.post_logout_token(Some(&token)).await.status().as_u16(), 200);

    let check = SessionRevocationCheck::new(app.revocation_store.clone());

    let status = check
        .status(Some("session-abc"), Some("user-123"))
        .await
        .unwrap();
    assert!(status.session_revoked);
    assert!(status.user_revoked);

    // The middleware tears the local session down, then clears the markers.
    check
        .clear(Some("session-abc"), Some("user-123"))
        .await
        .unwrap();
    let status = check
        .status(Some("session-abc"), Some("user-123"))
        .await
        .unwrap();
    assert!(!status.is_revoked());
    assert!(app.revocation_store.all_markers().await.is_empty());
}
