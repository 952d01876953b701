//! Maps a type token and method onto what the document declares.

use http::StatusCode;

use crate::doc::{ApiDocument, Method, VOCAB_PREFIX, VOCAB_ROUTE};

/// Whether a method is allowed on an entry point route, and the status to
/// answer with when it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointResolution {
    pub supported: bool,
    pub status: StatusCode,
}

impl EndpointResolution {
    const fn new(supported: bool, status: StatusCode) -> Self {
        Self { supported, status }
    }
}

/// Resolve `method` on the entry point route named `type_token`.
///
/// The vocabulary token never matches. A known route without the method
/// yields 405, an unknown route 404.
#[must_use]
pub fn resolve_collection_endpoint(
    doc: &ApiDocument,
    method: Method,
    type_token: &str,
) -> EndpointResolution {
    if type_token == VOCAB_ROUTE {
        return EndpointResolution::new(false, StatusCode::METHOD_NOT_ALLOWED);
    }

    let mut status = StatusCode::NOT_FOUND;
    for link in doc.entrypoint() {
        if link.name == type_token {
            status = StatusCode::METHOD_NOT_ALLOWED;
            if link.supports(method) {
                return EndpointResolution::new(true, StatusCode::OK);
            }
        }
    }
    EndpointResolution::new(false, status)
}

/// True iff class `class_title` declares an operation for `method`.
#[must_use]
pub fn resolve_class_operation(doc: &ApiDocument, class_title: &str, method: Method) -> bool {
    doc.class(class_title).is_some_and(|c| c.supports(method))
}

/// Payload type the first `method` operation of `class_title` expects,
/// with the vocabulary prefix removed.
#[must_use]
pub fn expected_type_for(doc: &ApiDocument, class_title: &str, method: Method) -> Option<String> {
    let expects = doc.class(class_title)?.operation(method)?.expects.as_deref()?;
    Some(strip_vocab_prefix(doc, expects).to_owned())
}

/// Remove one leading `vocab:` or `{base_url}{api_name}/vocab#`.
///
/// Anything after the prefix, colons included, is kept as is.
#[must_use]
pub fn strip_vocab_prefix<'a>(doc: &ApiDocument, term: &'a str) -> &'a str {
    if let Some(rest) = term.strip_prefix(VOCAB_PREFIX) {
        return rest;
    }
    let iri = format!("{}#", doc.vocab_url());
    term.strip_prefix(iri.as_str()).unwrap_or(term)
}
