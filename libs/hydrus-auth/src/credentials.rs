//! `Authorization: Basic` credential parsing.

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use http::{HeaderMap, header::AUTHORIZATION};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::AuthError;

/// Caller-supplied password.
///
/// `Debug` and `Display` print `[REDACTED]`; the buffer is zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read-only access to the secret. Never log the returned slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Decoded `id:password` pair from a Basic `Authorization` header.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub user_id: u64,
    pub password: Password,
}

impl BasicCredentials {
    #[must_use]
    pub fn new(user_id: u64, password: impl Into<String>) -> Self {
        Self {
            user_id,
            password: Password::new(password),
        }
    }

    /// Extract credentials from request headers.
    ///
    /// Returns `Ok(None)` when the request carries no `Authorization` header.
    ///
    /// # Errors
    /// Returns [`AuthError::MalformedCredentials`] when the header is present
    /// but is not a well-formed Basic credential.
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>, AuthError> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value.to_str().map_err(|_| {
            AuthError::MalformedCredentials("header value is not visible ASCII".to_owned())
        })?;
        Self::parse(value).map(Some)
    }

    /// Parse a raw `Basic <base64(id:password)>` header value.
    ///
    /// # Errors
    /// Returns [`AuthError::MalformedCredentials`] on a wrong scheme, invalid
    /// base64, a missing `:` separator, or a non-numeric user id.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        let (scheme, encoded) = value.trim().split_once(' ').ok_or_else(|| {
            AuthError::MalformedCredentials("expected `Basic <credentials>`".to_owned())
        })?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::MalformedCredentials(format!(
                "unsupported scheme `{scheme}`"
            )));
        }

        let decoded = Zeroizing::new(
            general_purpose::STANDARD
                .decode(encoded.trim())
                .map_err(|e| AuthError::MalformedCredentials(format!("invalid base64: {e}")))?,
        );
        let text = std::str::from_utf8(&decoded).map_err(|_| {
            AuthError::MalformedCredentials("credentials are not valid UTF-8".to_owned())
        })?;
        let (user, password) = text.split_once(':').ok_or_else(|| {
            AuthError::MalformedCredentials("missing `:` between id and password".to_owned())
        })?;
        let user_id = user.parse::<u64>().map_err(|_| {
            AuthError::MalformedCredentials(format!("user id `{user}` is not numeric"))
        })?;

        Ok(Self::new(user_id, password))
    }

    /// Encode as an `Authorization` header value.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        let raw = Zeroizing::new(format!("{}:{}", self.user_id, self.password.expose()));
        format!("Basic {}", general_purpose::STANDARD.encode(raw.as_bytes()))
    }
}
