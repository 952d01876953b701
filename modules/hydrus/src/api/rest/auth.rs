//! Auth gate middleware for resource routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use hydrus_auth::AuthOutcome;

use super::error::DispatchError;
use super::state::AppState;

/// Runs the [`hydrus_auth::AuthGate`] and stores the caller [`hydrus_auth::Identity`]
/// in request extensions. Denials are shaped like any other error.
pub async fn auth_gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = state.gate.authorize(request.headers()).await;
    match outcome {
        AuthOutcome::Allowed(identity) => {
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        AuthOutcome::Denied(failure) => {
            tracing::info!(
                method = %request.method(),
                path = request.uri().path(),
                status = failure.status.as_u16(),
                "request denied"
            );
            state.shaper.respond(Err(DispatchError::Auth(failure)))
        }
    }
}
