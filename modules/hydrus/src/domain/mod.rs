pub mod resolver;
pub mod storage;

pub use resolver::{
    EndpointResolution, expected_type_for, resolve_class_operation, resolve_collection_endpoint,
};
pub use storage::{MemberRef, Object, StorageError, StorageProvider, StorageSession};
