//! Storage adapter contract consumed by the dispatch core.

use async_trait::async_trait;
use http::StatusCode;
use hydrus_errors::Failure;
use serde_json::{Map, Value};

/// Stored instance without its `@id`, `@type` and `@context` keys.
pub type Object = Map<String, Value>;

/// Member of a collection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub id: u64,
    pub type_name: String,
}

/// Failures reported by a storage backend. Each carries the status the
/// caller will see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("The class {0} is not a valid/defined RDFClass")]
    ClassNotFound(String),
    #[error("The property {property} is not a valid/defined Property for class {class}")]
    PropertyNotFound { property: String, class: String },
    #[error("Object must carry a valid @type: {0}")]
    InvalidObject(String),
    #[error("Instance with ID {0} already exists")]
    InstanceExists(u64),
    #[error("Instance of type {type_name} with ID {id} not found")]
    InstanceNotFound { type_name: String, id: u64 },
    #[error("Instance of type {0} not found")]
    NotInstanceOfType(String),
    #[error("Storage failure: {0}")]
    Internal(String),
}

impl StorageError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            StorageError::ClassNotFound(_)
            | StorageError::PropertyNotFound { .. }
            | StorageError::InvalidObject(_)
            | StorageError::InstanceExists(_) => StatusCode::BAD_REQUEST,
            StorageError::InstanceNotFound { .. } | StorageError::NotInstanceOfType(_) => {
                StatusCode::NOT_FOUND
            }
            StorageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_failure(&self) -> Failure {
        Failure::new(self.status(), self.to_string())
    }
}

impl From<StorageError> for Failure {
    fn from(err: StorageError) -> Self {
        err.to_failure()
    }
}

/// Storage handle scoped to a single request.
///
/// Sessions are handed out fresh for every request and dropped with it.
/// Every method takes `&mut self`; a session is never shared.
#[async_trait]
pub trait StorageSession: Send {
    /// Instance `id` of class `type_name`.
    async fn get(&mut self, id: u64, type_name: &str) -> Result<Object, StorageError>;

    /// Members of class `type_name`, ordered by id.
    async fn get_collection(&mut self, type_name: &str) -> Result<Vec<MemberRef>, StorageError>;

    /// The single instance of class `type_name`.
    async fn get_single(&mut self, type_name: &str) -> Result<(u64, Object), StorageError>;

    /// Insert `object` (which must carry `@type`), optionally at an explicit id.
    async fn insert(&mut self, object: &Object, id: Option<u64>) -> Result<u64, StorageError>;

    /// Replace instance `id` of class `type_name` with `object`.
    async fn update(
        &mut self,
        object: &Object,
        id: u64,
        type_name: &str,
    ) -> Result<u64, StorageError>;

    /// Replace the single instance of class `type_name`, creating it if absent.
    async fn update_single(&mut self, object: &Object, type_name: &str)
    -> Result<(), StorageError>;

    async fn delete(&mut self, id: u64, type_name: &str) -> Result<(), StorageError>;

    async fn delete_single(&mut self, type_name: &str) -> Result<(), StorageError>;
}

/// Shared factory of per-request sessions.
pub trait StorageProvider: Send + Sync {
    /// # Errors
    /// Returns [`StorageError::Internal`] when the backend is unavailable.
    fn open_session(&self) -> Result<Box<dyn StorageSession>, StorageError>;
}
