//! Strongly-typed API documentation model.
//!
//! An [`ApiDocument`] is built once at startup and never mutated afterwards.
//! It is shared between request handlers behind an `Arc`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix of vocabulary-relative terms such as `vocab:Drone`.
pub const VOCAB_PREFIX: &str = "vocab:";
/// Suffix that turns a class title into its collection name.
pub const COLLECTION_SUFFIX: &str = "Collection";
/// Title of the synthetic entry point class.
pub const ENTRYPOINT: &str = "EntryPoint";
/// Path segment reserved for the vocabulary document.
pub const VOCAB_ROUTE: &str = "vocab";

/// HTTP method an operation can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Map a transport method. Anything outside GET/POST/PUT/DELETE is `None`.
    #[must_use]
    pub fn from_http(method: &http::Method) -> Option<Self> {
        match *method {
            http::Method::GET => Some(Method::Get),
            http::Method::POST => Some(Method::Post),
            http::Method::PUT => Some(Method::Put),
            http::Method::DELETE => Some(Method::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported method '{other}'")),
        }
    }
}

/// One operation a class or collection supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedOperation {
    pub title: String,
    pub method: Method,
    /// Expected payload type, usually a `vocab:` term.
    #[serde(default)]
    pub expects: Option<String>,
    #[serde(default)]
    pub returns: Option<String>,
}

impl SupportedOperation {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        method: Method,
        expects: Option<&str>,
        returns: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            method,
            expects: expects.map(str::to_owned),
            returns: returns.map(str::to_owned),
        }
    }
}

/// Property of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub title: String,
    /// IRI or `vocab:` term naming the property.
    pub property: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default = "default_true")]
    pub writeable: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub title: String,
    pub description: String,
    /// Ordered; lookups take the first entry for a method.
    pub supported_operations: Vec<SupportedOperation>,
    pub supported_properties: Vec<PropertyDescriptor>,
    /// Reachable from the entry point.
    pub endpoint: bool,
}

impl ClassDescriptor {
    /// First operation declared for `method`.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&SupportedOperation> {
        self.supported_operations.iter().find(|op| op.method == method)
    }

    #[must_use]
    pub fn supports(&self, method: Method) -> bool {
        self.operation(method).is_some()
    }

    pub fn property_titles(&self) -> impl Iterator<Item = &str> {
        self.supported_properties.iter().map(|p| p.title.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    pub name: String,
    /// Title of the wrapped class; always present in the owning document.
    pub class_title: String,
    pub description: String,
    pub supported_operations: Vec<SupportedOperation>,
}

impl CollectionDescriptor {
    /// Operations a collection gets when its definition declares none.
    #[must_use]
    pub fn default_operations(class_title: &str) -> Vec<SupportedOperation> {
        let class_term = format!("{VOCAB_PREFIX}{class_title}");
        vec![
            SupportedOperation::new(
                format!("Get all {class_title}s"),
                Method::Get,
                None,
                Some(&format!("{VOCAB_PREFIX}{class_title}{COLLECTION_SUFFIX}")),
            ),
            SupportedOperation::new(
                format!("Add {class_title}"),
                Method::Put,
                Some(&class_term),
                Some(&class_term),
            ),
        ]
    }
}

/// Named link published by the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointLink {
    pub name: String,
    pub route: String,
    pub supported_operations: Vec<SupportedOperation>,
}

impl EntryPointLink {
    #[must_use]
    pub fn supports(&self, method: Method) -> bool {
        self.supported_operations.iter().any(|op| op.method == method)
    }
}

/// Read-only description of one API surface.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    pub(crate) api_name: String,
    pub(crate) base_url: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) parsed_classes: IndexMap<String, ClassDescriptor>,
    pub(crate) collections: IndexMap<String, CollectionDescriptor>,
    pub(crate) entrypoint: Vec<EntryPointLink>,
}

impl ApiDocument {
    /// Path prefix without slashes, e.g. `api`.
    #[must_use]
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Public base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn classes(&self) -> &IndexMap<String, ClassDescriptor> {
        &self.parsed_classes
    }

    #[must_use]
    pub fn collections(&self) -> &IndexMap<String, CollectionDescriptor> {
        &self.collections
    }

    #[must_use]
    pub fn entrypoint(&self) -> &[EntryPointLink] {
        &self.entrypoint
    }

    #[must_use]
    pub fn class(&self, title: &str) -> Option<&ClassDescriptor> {
        self.parsed_classes.get(title)
    }

    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&CollectionDescriptor> {
        self.collections.get(name)
    }

    #[must_use]
    pub fn is_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// A class addressed directly, without a `{name}Collection` shadowing it.
    #[must_use]
    pub fn is_singleton_class(&self, name: &str) -> bool {
        self.parsed_classes.contains_key(name)
            && !self
                .collections
                .contains_key(&format!("{name}{COLLECTION_SUFFIX}"))
    }

    /// Class wrapped by the collection named `token`.
    #[must_use]
    pub fn wrapped_class(&self, token: &str) -> Option<&ClassDescriptor> {
        self.collection(token)
            .and_then(|c| self.parsed_classes.get(&c.class_title))
    }

    /// `{base_url}{api_name}/vocab`
    #[must_use]
    pub fn vocab_url(&self) -> String {
        format!("{}{}/{VOCAB_ROUTE}", self.base_url, self.api_name)
    }
}
