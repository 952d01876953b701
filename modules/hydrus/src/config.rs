use std::path::PathBuf;
use std::sync::Arc;

use hydrus_auth::{AuthGate, MemoryIdentityStore};
use serde::{Deserialize, Serialize, Serializer};

use crate::api::rest::AppState;
use crate::doc::{ApiDocument, DocumentDefinition, DocumentError, sample};
use crate::infra::storage::MemoryStorage;

/// Configuration of one hydrus API surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrusConfig {
    /// Path prefix, e.g. `api` for `/api/vocab`.
    pub api_name: String,
    /// Public URL the server is reached at. Used in `Location` and `Link` headers.
    pub base_url: String,
    /// Require HTTP Basic credentials on resource routes.
    pub authentication: bool,
    /// JSON or YAML document definition; the built-in drone API when unset.
    pub doc_path: Option<PathBuf>,
    /// Users of the in-memory identity store.
    pub users: Vec<UserConfig>,
}

impl Default for HydrusConfig {
    fn default() -> Self {
        Self {
            api_name: "api".to_owned(),
            base_url: "http://localhost:8080/".to_owned(),
            authentication: false,
            doc_path: None,
            users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub id: u64,
    #[serde(serialize_with = "redact")]
    pub password: String,
}

fn redact<S: Serializer>(_: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("[REDACTED]")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("base_url '{0}' cannot be used in response headers")]
    InvalidBaseUrl(String),
    #[error("authentication is enabled but no users are configured")]
    NoUsers,
}

impl HydrusConfig {
    /// Load the document this configuration points at.
    ///
    /// # Errors
    /// Returns a [`DocumentError`] when the definition cannot be read or is invalid.
    pub fn load_document(&self) -> Result<ApiDocument, DocumentError> {
        let definition = match &self.doc_path {
            Some(path) => DocumentDefinition::from_path(path)?,
            None => sample::definition()?,
        };
        ApiDocument::from_definition(definition, &self.api_name, &self.base_url)
    }

    /// Document, in-memory storage and auth gate wired into an [`AppState`].
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for an invalid document, an unusable base URL,
    /// or authentication without users.
    pub fn build_state(&self) -> Result<AppState, ConfigError> {
        if self.authentication && self.users.is_empty() {
            return Err(ConfigError::NoUsers);
        }
        let doc = Arc::new(self.load_document()?);

        let store = MemoryIdentityStore::default();
        for user in &self.users {
            store.add_user(user.id, &user.password);
        }
        let gate = AuthGate::new(self.authentication, Arc::new(store));
        let storage = Arc::new(MemoryStorage::new(&doc));

        tracing::info!(
            api_name = doc.api_name(),
            classes = doc.classes().len(),
            collections = doc.collections().len(),
            authentication = self.authentication,
            "hydrus state built"
        );

        AppState::new(doc, storage, gate)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))
    }
}
