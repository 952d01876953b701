//! Router for one API surface, built from the document's api name.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, get};
use tower_http::trace::TraceLayer;

use super::auth::auth_gate_middleware;
use super::handlers;
use super::state::AppState;

fn read_only(handler: MethodRouter<AppState>) -> MethodRouter<AppState> {
    handler.fallback(handlers::method_not_allowed)
}

/// All routes under `/{api_name}`.
///
/// Only the resource routes pass the auth gate. Unknown paths get a shaped
/// 404, unsupported methods a shaped 405.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = state.doc.api_name().to_owned();

    let resources = Router::new()
        .route(
            &format!("/{api}/{{type_token}}"),
            get(handlers::collection)
                .post(handlers::collection)
                .put(handlers::collection)
                .delete(handlers::collection)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            &format!("/{api}/{{type_token}}/{{id}}"),
            get(handlers::item)
                .post(handlers::item)
                .put(handlers::item)
                .delete(handlers::item)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_gate_middleware));

    tracing::info!(
        api = %api,
        authentication = state.gate.is_required(),
        "hydrus routes registered"
    );

    Router::new()
        .route(&format!("/{api}"), read_only(get(handlers::index)))
        .route(&format!("/{api}/"), read_only(get(handlers::index)))
        .route(&format!("/{api}/vocab"), read_only(get(handlers::vocab)))
        .route(
            &format!("/{api}/contexts/EntryPoint.jsonld"),
            read_only(get(handlers::entrypoint_context)),
        )
        .route(
            &format!("/{api}/contexts/{{file}}"),
            read_only(get(handlers::context)),
        )
        .merge(resources)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
