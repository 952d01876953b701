//! API documentation: model, definition loading and JSON-LD generation.

pub mod definition;
pub mod generate;
pub mod model;
pub mod sample;

pub use definition::{ClassDefinition, CollectionDefinition, DocumentDefinition, DocumentError};
pub use generate::HYDRA_NS;
pub use model::{
    ApiDocument, COLLECTION_SUFFIX, ClassDescriptor, CollectionDescriptor, ENTRYPOINT,
    EntryPointLink, Method, PropertyDescriptor, SupportedOperation, VOCAB_PREFIX, VOCAB_ROUTE,
};
