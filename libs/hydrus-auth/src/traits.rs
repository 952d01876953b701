use crate::{credentials::BasicCredentials, errors::AuthError};
use async_trait::async_trait;

/// Verifies caller credentials.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Check the credentials against the store.
    ///
    /// `Ok(false)` means the identity exists but the password does not match.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the identity is unknown or the store fails;
    /// the error's status and message are reported to the caller verbatim.
    async fn check(&self, credentials: &BasicCredentials) -> Result<bool, AuthError>;
}
