//! Per-request context handed to resource handlers.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::response::Response;
use http::request::Parts;
use hydrus_auth::Identity;

use super::shaper::ResponseShaper;
use super::state::AppState;
use crate::doc::ApiDocument;
use crate::domain::storage::StorageSession;

/// Built at request entry, dropped with the response.
///
/// Owns a storage session nobody else sees.
pub struct RequestContext {
    pub doc: Arc<ApiDocument>,
    pub session: Box<dyn StorageSession>,
    pub shaper: ResponseShaper,
    /// Authentication is switched on for this API.
    pub authentication: bool,
    /// Caller validated by the auth gate, if any.
    pub identity: Option<Identity>,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.storage.open_session().map_err(|err| {
            tracing::error!(error = %err, "failed to open storage session");
            state.shaper.failure(&err.to_failure())
        })?;
        Ok(Self {
            doc: Arc::clone(&state.doc),
            session,
            shaper: state.shaper.clone(),
            authentication: state.gate.is_required(),
            identity: parts.extensions.get::<Identity>().copied(),
        })
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("api_name", &self.doc.api_name())
            .field("authentication", &self.authentication)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
