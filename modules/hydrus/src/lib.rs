//! Hydrus: a Hydra hypermedia API server driven by an API documentation.
//!
//! An [`ApiDocument`] describes classes, collections and their operations.
//! [`router`] turns it into CRUD endpoints under `/{api_name}` backed by a
//! [`StorageProvider`], gated by an optional HTTP Basic [`hydrus_auth::AuthGate`].

pub mod api;
pub mod config;
pub mod doc;
pub mod domain;
pub mod infra;

pub use api::rest::{AppState, DispatchError, RequestContext, ResponseShaper, router};
pub use config::{ConfigError, HydrusConfig, UserConfig};
pub use doc::{ApiDocument, DocumentDefinition, DocumentError};
pub use domain::storage::{StorageError, StorageProvider, StorageSession};
pub use infra::storage::MemoryStorage;
