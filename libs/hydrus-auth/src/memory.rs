//! In-memory identity store keyed by numeric user id.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha224};

use crate::{credentials::BasicCredentials, errors::AuthError, traits::IdentityStore};

/// Keeps SHA-224 hex digests of user passwords.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    users: RwLock<HashMap<u64, String>>,
}

impl MemoryIdentityStore {
    /// Register a user, replacing any previous password.
    pub fn add_user(&self, user_id: u64, password: &str) {
        self.users.write().insert(user_id, digest(password));
        tracing::debug!(user_id, "registered user");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

fn digest(password: &str) -> String {
    hex::encode(Sha224::digest(password.as_bytes()))
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn check(&self, credentials: &BasicCredentials) -> Result<bool, AuthError> {
        let users = self.users.read();
        let stored = users
            .get(&credentials.user_id)
            .ok_or(AuthError::UnknownUser(credentials.user_id))?;
        Ok(*stored == digest(credentials.password.expose()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha224_hex() {
        assert_eq!(
            digest("test"),
            "90a3ed9e32b2aaf4c61c410eb925426119e1a9dc53d4286ade99a809"
        );
    }

    #[tokio::test]
    async fn check_matches_password() {
        let store = MemoryIdentityStore::default();
        store.add_user(1, "test");
        assert!(store.check(&BasicCredentials::new(1, "test")).await.unwrap());
        assert!(!store.check(&BasicCredentials::new(1, "nope")).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_user_is_an_error() {
        let store = MemoryIdentityStore::default();
        let err = store.check(&BasicCredentials::new(7, "x")).await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownUser(7)));
    }

    #[test]
    fn add_user_replaces_password() {
        let store = MemoryIdentityStore::default();
        store.add_user(1, "a");
        store.add_user(1, "b");
        assert_eq!(store.len(), 1);
    }
}
