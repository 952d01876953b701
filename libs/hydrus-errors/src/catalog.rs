//! Error catalog support: static definitions turned into `Failure`s on demand

use crate::failure::Failure;
use http::StatusCode;

/// Static error definition from a catalog
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub code: &'static str,
    pub message: &'static str,
}

impl ErrDef {
    /// Convert this definition into a `Failure` carrying the catalog message
    #[inline]
    pub fn as_failure(&self) -> Failure {
        self.with_message(self.message)
    }

    /// Convert this definition into a `Failure` with an occurrence-specific message
    #[inline]
    pub fn with_message(&self, message: impl Into<String>) -> Failure {
        Failure::new(self.status_code(), message)
    }

    /// Invalid catalog codes degrade to 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
