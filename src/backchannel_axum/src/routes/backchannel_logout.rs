//! Axum-specific back-channel logout route.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use backchannel_application::{BackchannelLogoutError, BackchannelLogoutUseCase};
use backchannel_core::{LogoutTokenVerifier, RevocationStore};
use serde::Deserialize;

/// State for the back-channel logout route: the orchestrating use case plus
/// the response diagnostics switch.
pub struct BackchannelLogoutState<V, R>
where
    V: LogoutTokenVerifier,
    R: RevocationStore,
{
    pub use_case: BackchannelLogoutUseCase<V, R>,
    /// When set, rejection bodies carry internal error detail in addition
    /// to the stable reason string. Off in production.
    pub diagnostics: bool,
}

impl<V, R> Clone for BackchannelLogoutState<V, R>
where
    V: LogoutTokenVerifier + Clone,
    R: RevocationStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            use_case: self.use_case.clone(),
            diagnostics: self.diagnostics,
        }
    }
}

/// Request body of the back-channel logout endpoint
/// (`application/x-www-form-urlencoded` per Back-Channel Logout 1.0).
#[derive(Debug, Deserialize)]
pub struct BackchannelLogoutRequest {
    #[serde(default)]
    pub logout_token: Option<String>,
}

/// Axum back-channel logout route.
///
/// `200` - token verified, validated, and revocation recorded.
/// `400` - any verification or validation failure; the body names the
///         failing rule.
/// `500` - the revocation marker could not be written after the claims
///         were already validated.
#[tracing::instrument(name = "Backchannel logout", skip(state, request))]
pub async fn backchannel_logout<V, R>(
    State(state): State<BackchannelLogoutState<V, R>>,
    Form(request): Form<BackchannelLogoutRequest>,
) -> Response
where
    V: LogoutTokenVerifier + Clone + 'static,
    R: RevocationStore + Clone + 'static,
{
    let logout_token = request.logout_token.unwrap_or_default();

    match state.use_case.execute(&logout_token).await {
        Ok(validated) => {
            tracing::info!(
                sid = validated.session_id.as_deref().unwrap_or("-"),
                sub = validated.subject.as_deref().unwrap_or("-"),
                "back-channel logout recorded"
            );
            StatusCode::OK.into_response()
        }
        Err(error) => BackchannelLogoutRejection {
            error,
            diagnostics: state.diagnostics,
        }
        .into_response(),
    }
}

/// Failed back-channel logout, mapped onto the HTTP taxonomy.
#[derive(Debug)]
pub struct BackchannelLogoutRejection {
    pub error: BackchannelLogoutError,
    pub diagnostics: bool,
}

impl IntoResponse for BackchannelLogoutRejection {
    fn into_response(self) -> Response {
        let (status, body) = rejection_parts(&self.error, self.diagnostics);

        if status.is_server_error() {
            tracing::error!(error = ?self.error, "back-channel logout not recorded");
        } else {
            tracing::warn!(error = ?self.error, "back-channel logout rejected");
        }

        (status, body).into_response()
    }
}

fn rejection_parts(error: &BackchannelLogoutError, diagnostics: bool) -> (StatusCode, String) {
    let status = if error.is_rejection() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let mut body = error.to_string();
    if diagnostics {
        if let BackchannelLogoutError::Verification(verification) = error {
            if let Some(detail) = verification.detail() {
                body = format!("{body} ({detail})");
            }
        }
    }

    (status, body)
}
