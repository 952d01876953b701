//! Every response leaves through [`ResponseShaper`].

use axum::body::Body;
use axum::response::Response;
use http::header::{CONTENT_TYPE, InvalidHeaderValue, LINK, LOCATION, WWW_AUTHENTICATE};
use http::{HeaderMap, HeaderValue, StatusCode};
use hydrus_auth::BASIC_CHALLENGE;
use hydrus_errors::{APPLICATION_LD_JSON, Failure};
use serde_json::{Value, json};

use super::error::DispatchError;
use crate::doc::{ApiDocument, HYDRA_NS};

/// Successful handler output before shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub location: Option<String>,
}

impl Reply {
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            location: None,
        }
    }

    /// `{"message": ...}` body.
    #[must_use]
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }
}

/// Sets content type and the documentation `Link` header on responses.
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    link: HeaderValue,
    base_url: String,
    api_name: String,
}

impl ResponseShaper {
    /// # Errors
    /// Fails when the document's vocabulary URL is not a valid header value.
    pub fn new(doc: &ApiDocument) -> Result<Self, InvalidHeaderValue> {
        let link = HeaderValue::from_str(&format!(
            "<{}>; rel=\"{HYDRA_NS}apiDocumentation\"",
            doc.vocab_url()
        ))?;
        Ok(Self {
            link,
            base_url: doc.base_url().to_owned(),
            api_name: doc.api_name().to_owned(),
        })
    }

    /// Build a response: status, extra headers, content type, then `Link`.
    #[must_use]
    pub fn shape(&self, status: StatusCode, body: &Value, extra: HeaderMap) -> Response {
        let bytes = match serde_json::to_vec(body) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                br#"{"message":"Internal Server Error"}"#.to_vec()
            }
        };
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.extend(extra);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_LD_JSON));
        headers.insert(LINK, self.link.clone());
        response
    }

    #[must_use]
    pub fn ok(&self, body: &Value) -> Response {
        self.shape(StatusCode::OK, body, HeaderMap::new())
    }

    /// Error body `{"message": ...}`; 401 adds the Basic challenge.
    #[must_use]
    pub fn failure(&self, failure: &Failure) -> Response {
        let mut extra = HeaderMap::new();
        if failure.status == StatusCode::UNAUTHORIZED {
            extra.insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        }
        self.shape(failure.status, &json!({ "message": failure.message }), extra)
    }

    #[must_use]
    pub fn reply(&self, reply: &Reply) -> Response {
        let mut extra = HeaderMap::new();
        if let Some(location) = &reply.location {
            match HeaderValue::from_str(location) {
                Ok(value) => {
                    extra.insert(LOCATION, value);
                }
                Err(err) => tracing::warn!(%location, error = %err, "dropping invalid Location"),
            }
        }
        self.shape(reply.status, &reply.body, extra)
    }

    #[must_use]
    pub fn respond(&self, result: Result<Reply, DispatchError>) -> Response {
        match result {
            Ok(reply) => self.reply(&reply),
            Err(err) => {
                let failure = err.to_failure();
                tracing::debug!(
                    status = failure.status.as_u16(),
                    code = err.def().map(|def| def.code),
                    error = %err,
                    "request failed"
                );
                self.failure(&failure)
            }
        }
    }

    /// `{base_url}{api_name}/{type}/{id}`, or with a trailing `/` when `id` is `None`.
    #[must_use]
    pub fn location(&self, type_token: &str, id: Option<u64>) -> String {
        let id = id.as_ref().map_or_else(String::new, ToString::to_string);
        format!("{}{}/{type_token}/{id}", self.base_url, self.api_name)
    }
}
