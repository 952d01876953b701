//! Built-in drone fleet document, served when no document file is configured.

use super::definition::{DocumentDefinition, DocumentError};
use super::model::ApiDocument;

const SAMPLE: &str = include_str!("sample.json");

/// Raw definition of the built-in document.
///
/// # Errors
/// Only fails if the embedded JSON is malformed.
pub fn definition() -> Result<DocumentDefinition, DocumentError> {
    DocumentDefinition::from_json(SAMPLE)
}

/// Built-in document served under `/{api_name}`.
///
/// # Errors
/// Returns [`DocumentError::InvalidApiName`] for an unusable `api_name`.
pub fn document(api_name: &str, base_url: &str) -> Result<ApiDocument, DocumentError> {
    ApiDocument::from_definition(definition()?, api_name, base_url)
}
