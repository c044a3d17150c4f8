use backchannel_core::{RevocationStore, RevocationStoreError, session_logout_key, user_logout_key};

/// Which revocation markers exist for a session and/or user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevocationStatus {
    pub session_revoked: bool,
    pub user_revoked: bool,
}

impl RevocationStatus {
    /// True if the locally cached session must be torn down.
    pub fn is_revoked(&self) -> bool {
        self.session_revoked || self.user_revoked
    }
}

/// Session revocation check - consulted by the authenticated-request
/// middleware to decide whether a locally cached session is still valid.
///
/// The consumer is responsible for calling [`clear`](Self::clear) once it
/// has torn down the corresponding local session; markers never expire on
/// their own.
pub struct SessionRevocationCheck<R>
where
    R: RevocationStore,
{
    revocation_store: R,
}

impl<R> Clone for SessionRevocationCheck<R>
where
    R: RevocationStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            revocation_store: self.revocation_store.clone(),
        }
    }
}

impl<R> SessionRevocationCheck<R>
where
    R: RevocationStore,
{
    pub fn new(revocation_store: R) -> Self {
        Self { revocation_store }
    }

    /// Report whether a logout marker exists for the given session id
    /// and/or subject.
    #[tracing::instrument(name = "SessionRevocationCheck::status", skip(self))]
    pub async fn status(
        &self,
        session_id: Option<&str>,
        subject: Option<&str>,
    ) -> Result<RevocationStatus, RevocationStoreError> {
        let session_revoked = match session_id {
            Some(sid) => self
                .revocation_store
                .get(&session_logout_key(sid))
                .await?
                .is_some(),
            None => false,
        };

        let user_revoked = match subject {
            Some(sub) => self
                .revocation_store
                .get(&user_logout_key(sub))
                .await?
                .is_some(),
            None => false,
        };

        Ok(RevocationStatus {
            session_revoked,
            user_revoked,
        })
    }

    /// Delete the markers for a session/user whose local session has been
    /// torn down, so later requests are not rejected on stale state.
    #[tracing::instrument(name = "SessionRevocationCheck::clear", skip(self))]
    pub async fn clear(
        &self,
        session_id: Option<&str>,
        subject: Option<&str>,
    ) -> Result<(), RevocationStoreError> {
        if let Some(sid) = session_id {
            self.revocation_store
                .delete(&session_logout_key(sid))
                .await?;
            tracing::info!(sid = %sid, "session revocation marker cleared");
        }

        if let Some(sub) = subject {
            self.revocation_store.delete(&user_logout_key(sub)).await?;
            tracing::info!(sub = %sub, "user revocation marker cleared");
        }

        Ok(())
    }
}
