use hydrus_errors::{ErrDef, Failure};

use crate::domain::storage::StorageError;

/// Errors owned by the dispatch core itself.
pub mod catalog {
    use hydrus_errors::ErrDef;

    pub const ROUTE_NOT_FOUND: ErrDef = ErrDef {
        status: 404,
        code: "HYDRUS_ROUTE_NOT_FOUND",
        message: "Not Found",
    };

    pub const METHOD_NOT_ALLOWED: ErrDef = ErrDef {
        status: 405,
        code: "HYDRUS_METHOD_NOT_ALLOWED",
        message: "Method Not Allowed",
    };

    pub const MALFORMED_PAYLOAD: ErrDef = ErrDef {
        status: 400,
        code: "HYDRUS_MALFORMED_PAYLOAD",
        message: "Bad Request",
    };
}

/// Why a request could not be dispatched.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Denial produced by the auth gate, status and message included.
    #[error("authentication failed: {}", .0.message)]
    Auth(Failure),
    #[error("no route for '{0}'")]
    RouteNotFound(String),
    #[error("{method} not allowed on '{route}'")]
    MethodNotAllowed { method: String, route: String },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// Forwarded verbatim.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DispatchError {
    #[must_use]
    pub fn method_not_allowed(method: impl Into<String>, route: impl Into<String>) -> Self {
        DispatchError::MethodNotAllowed {
            method: method.into(),
            route: route.into(),
        }
    }

    pub fn to_failure(&self) -> Failure {
        match (self, self.def()) {
            (_, Some(def)) => def.as_failure(),
            (DispatchError::Auth(failure), None) => failure.clone(),
            (DispatchError::Storage(err), None) => err.to_failure(),
            (_, None) => Failure::internal(self.to_string()),
        }
    }

    /// Catalog entry for core-owned errors.
    #[must_use]
    pub fn def(&self) -> Option<&'static ErrDef> {
        match self {
            DispatchError::RouteNotFound(_) => Some(&catalog::ROUTE_NOT_FOUND),
            DispatchError::MethodNotAllowed { .. } => Some(&catalog::METHOD_NOT_ALLOWED),
            DispatchError::MalformedPayload(_) => Some(&catalog::MALFORMED_PAYLOAD),
            DispatchError::Auth(_) | DispatchError::Storage(_) => None,
        }
    }
}

impl From<DispatchError> for Failure {
    fn from(err: DispatchError) -> Self {
        err.to_failure()
    }
}
