//! Documentation routes: index, vocabulary and contexts. Never gated.

use axum::extract::{Path, State};
use axum::response::Response;
use serde_json::json;

use crate::api::rest::error::DispatchError;
use crate::api::rest::state::AppState;
use crate::doc::COLLECTION_SUFFIX;

/// Entry point body.
pub async fn index(State(state): State<AppState>) -> Response {
    state.shaper.ok(&state.doc.entrypoint_body())
}

/// Full `ApiDocumentation`.
pub async fn vocab(State(state): State<AppState>) -> Response {
    state.shaper.ok(&state.doc.vocab())
}

/// Context of the entry point body, not the body itself.
pub async fn entrypoint_context(State(state): State<AppState>) -> Response {
    state
        .shaper
        .ok(&json!({ "@context": state.doc.entrypoint_context() }))
}

/// `/contexts/{category}.jsonld` for a class or a collection.
pub async fn context(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let generated = file.strip_suffix(".jsonld").and_then(|category| {
        if category.contains(COLLECTION_SUFFIX) {
            state.doc.collection_context(category)
        } else {
            state.doc.class_context(category)
        }
    });
    match generated {
        Some(ctx) => state.shaper.ok(&json!({ "@context": ctx })),
        None => state
            .shaper
            .respond(Err(DispatchError::RouteNotFound(format!("contexts/{file}")))),
    }
}
