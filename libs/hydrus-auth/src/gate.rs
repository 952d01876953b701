//! Per-request authentication decision.

use std::sync::Arc;

use http::HeaderMap;
use hydrus_errors::Failure;

use crate::{
    credentials::BasicCredentials, errors::AuthError, memory::MemoryIdentityStore,
    traits::IdentityStore,
};

/// Value of the `WWW-Authenticate` header sent with every 401.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"Login Required\"";

/// Caller validated for exactly one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
}

/// Result of running the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Request may proceed. `None` when authentication is switched off.
    Allowed(Option<Identity>),
    /// Request is rejected with the carried status and message.
    Denied(Failure),
}

/// Decides whether a request is authenticated.
#[derive(Clone)]
pub struct AuthGate {
    required: bool,
    store: Arc<dyn IdentityStore>,
}

impl AuthGate {
    #[must_use]
    pub fn new(required: bool, store: Arc<dyn IdentityStore>) -> Self {
        Self { required, store }
    }

    /// Gate that lets every request through.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(false, Arc::new(MemoryIdentityStore::default()))
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Authorize one request from its headers.
    ///
    /// Without credential material the caller is denied with 401. Failures
    /// raised by the identity store keep their own status and message; a
    /// password mismatch is a plain 401.
    pub async fn authorize(&self, headers: &HeaderMap) -> AuthOutcome {
        if !self.required {
            return AuthOutcome::Allowed(None);
        }

        let credentials = match BasicCredentials::from_headers(headers) {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return AuthOutcome::Denied(AuthError::Unauthenticated.to_failure()),
            Err(err) => {
                tracing::debug!(error = %err, "rejecting malformed credentials");
                return AuthOutcome::Denied(err.to_failure());
            }
        };

        match self.store.check(&credentials).await {
            Ok(true) => AuthOutcome::Allowed(Some(Identity {
                user_id: credentials.user_id,
            })),
            Ok(false) => {
                tracing::info!(user_id = credentials.user_id, "password mismatch");
                AuthOutcome::Denied(AuthError::InvalidCredentials.to_failure())
            }
            Err(err) => {
                tracing::info!(
                    user_id = credentials.user_id,
                    error = %err,
                    "identity check failed"
                );
                AuthOutcome::Denied(err.to_failure())
            }
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}
