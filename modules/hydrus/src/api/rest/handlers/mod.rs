pub mod collection;
pub mod docs;
pub mod item;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use http::{Method as HttpMethod, StatusCode, Uri};
use serde_json::Value;

use super::error::DispatchError;
use super::state::AppState;
use crate::doc::ApiDocument;
use crate::domain::resolver::EndpointResolution;
use crate::domain::storage::Object;

pub use collection::collection;
pub use docs::{context, entrypoint_context, index, vocab};
pub use item::item;

/// Add `@id`, `@type` and the class `@context` to a stored object.
pub(crate) fn hydrafy(doc: &ApiDocument, mut object: Object, id: String, type_name: &str) -> Value {
    object.insert(
        "@context".to_owned(),
        Value::String(format!(
            "/{}/contexts/{type_name}.jsonld",
            doc.api_name()
        )),
    );
    object.insert("@id".to_owned(), Value::String(id));
    object.insert("@type".to_owned(), Value::String(type_name.to_owned()));
    Value::Object(object)
}

/// Request body as a JSON object.
pub(crate) fn parse_object(body: Result<Bytes, BytesRejection>) -> Result<Object, DispatchError> {
    let bytes = body.map_err(|e| DispatchError::MalformedPayload(e.body_text()))?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(DispatchError::MalformedPayload(
            "body is not a JSON object".to_owned(),
        )),
        Err(err) => Err(DispatchError::MalformedPayload(err.to_string())),
    }
}

/// Payload `@type` must equal `expected`. Absent and mismatched are the same error.
pub(crate) fn check_discriminator<'a>(
    object: &'a Object,
    expected: Option<&str>,
) -> Result<&'a str, DispatchError> {
    let found = object.get("@type").and_then(Value::as_str);
    match (found, expected) {
        (Some(found), Some(expected)) if found == expected => Ok(found),
        _ => Err(DispatchError::MalformedPayload(format!(
            "@type '{}' does not match expected '{}'",
            found.unwrap_or_default(),
            expected.unwrap_or_default()
        ))),
    }
}

/// Resolver denial as an error carrying the resolver's status.
pub(crate) fn denied(
    resolution: EndpointResolution,
    method: crate::doc::Method,
    type_token: &str,
) -> DispatchError {
    if resolution.status == StatusCode::NOT_FOUND {
        DispatchError::RouteNotFound(type_token.to_owned())
    } else {
        DispatchError::method_not_allowed(method.as_str(), type_token)
    }
}

/// Method fallback of every route.
pub async fn method_not_allowed(
    State(state): State<AppState>,
    method: HttpMethod,
    uri: Uri,
) -> Response {
    state.shaper.respond(Err(DispatchError::method_not_allowed(
        method.as_str(),
        uri.path(),
    )))
}

/// Router fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    state
        .shaper
        .respond(Err(DispatchError::RouteNotFound(uri.path().to_owned())))
}
