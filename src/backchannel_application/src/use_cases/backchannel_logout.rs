use backchannel_core::{
    LogoutClaimsError, LogoutTokenError, LogoutTokenVerifier, REVOKED_MARKER, RevocationStore,
    RevocationStoreError, ValidatedLogout, session_logout_key, user_logout_key,
    validate_logout_claims,
};

/// Error types for the back-channel logout use case
#[derive(Debug, thiserror::Error)]
pub enum BackchannelLogoutError {
    /// Signature or standard-claim verification failed; client error.
    #[error(transparent)]
    Verification(#[from] LogoutTokenError),
    /// Semantic claim validation failed; client error.
    #[error(transparent)]
    Validation(#[from] LogoutClaimsError),
    /// Claims were valid but the revocation marker could not be recorded;
    /// server error. The sender must not be told the logout succeeded.
    #[error("Logout was not recorded")]
    StoreWrite(#[from] RevocationStoreError),
}

impl BackchannelLogoutError {
    /// True for failures caused by the token itself rather than by
    /// infrastructure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Verification(_) | Self::Validation(_))
    }
}

/// Back-channel logout use case - verifies a logout token and records
/// revocation markers for the session and/or user it names.
///
/// Sequencing: verify signature and standard claims, validate the
/// back-channel-logout semantics, then write the markers. Any failure is
/// terminal for the request; nothing is retried here (retry policy belongs
/// to the sending provider). Replaying the same valid token rewrites the
/// same markers, so the operation is idempotent under at-least-once
/// delivery.
pub struct BackchannelLogoutUseCase<V, R>
where
    V: LogoutTokenVerifier,
    R: RevocationStore,
{
    verifier: V,
    revocation_store: R,
}

impl<V, R> Clone for BackchannelLogoutUseCase<V, R>
where
    V: LogoutTokenVerifier + Clone,
    R: RevocationStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
            revocation_store: self.revocation_store.clone(),
        }
    }
}

impl<V, R> BackchannelLogoutUseCase<V, R>
where
    V: LogoutTokenVerifier,
    R: RevocationStore,
{
    pub fn new(verifier: V, revocation_store: R) -> Self {
        Self {
            verifier,
            revocation_store,
        }
    }

    /// Execute the back-channel logout use case
    ///
    /// # Arguments
    /// * `raw_token` - The logout token exactly as received on the wire
    ///
    /// # Returns
    /// The identifiers the logout applied to, or BackchannelLogoutError
    #[tracing::instrument(name = "BackchannelLogoutUseCase::execute", skip(self, raw_token))]
    pub async fn execute(
        &self,
        raw_token: &str,
    ) -> Result<ValidatedLogout, BackchannelLogoutError> {
        let claims = self.verifier.verify(raw_token).await?;
        tracing::debug!("logout token signature and standard claims verified");

        let validated = validate_logout_claims(&claims)?;

        if let Some(session_id) = validated.session_id.as_deref() {
            self.revocation_store
                .set(&session_logout_key(session_id), REVOKED_MARKER)
                .await?;
            tracing::info!(sid = %session_id, "session revocation marker recorded");
        }

        if let Some(subject) = validated.subject.as_deref() {
            self.revocation_store
                .set(&user_logout_key(subject), REVOKED_MARKER)
                .await?;
            tracing::info!(sub = %subject, "user revocation marker recorded");
        }

        Ok(validated)
    }
}
