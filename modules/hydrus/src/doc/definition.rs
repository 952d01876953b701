//! Serializable document definitions and their validation into an [`ApiDocument`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::model::{
    ApiDocument, COLLECTION_SUFFIX, ClassDescriptor, CollectionDescriptor, ENTRYPOINT,
    EntryPointLink, PropertyDescriptor, SupportedOperation, VOCAB_ROUTE,
};

/// Reasons a document definition cannot become an [`ApiDocument`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse document: {0}")]
    Parse(String),
    #[error("invalid api name '{0}'")]
    InvalidApiName(String),
    #[error("duplicate class '{0}'")]
    DuplicateClass(String),
    #[error("duplicate collection '{0}'")]
    DuplicateCollection(String),
    #[error("collection '{collection}' wraps unknown class '{class}'")]
    UnknownClass { collection: String, class: String },
    #[error("name '{0}' is reserved")]
    ReservedName(String),
    #[error("collection '{name}' must be named '{expected}'")]
    CollectionName { name: String, expected: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supported_operations: Vec<SupportedOperation>,
    #[serde(default)]
    pub supported_properties: Vec<PropertyDefinition>,
    #[serde(default)]
    pub endpoint: bool,
}

pub type PropertyDefinition = PropertyDescriptor;

/// Collection of a class. `name`, when given, must be `{class}Collection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDefinition {
    pub class: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supported_operations: Option<Vec<SupportedOperation>>,
}

/// Input format of a document, as read from JSON or YAML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub collections: Vec<CollectionDefinition>,
}

impl DocumentDefinition {
    /// # Errors
    /// Returns [`DocumentError::Parse`] on malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(raw).map_err(|e| DocumentError::Parse(e.to_string()))
    }

    /// # Errors
    /// Returns [`DocumentError::Parse`] on malformed YAML.
    pub fn from_yaml(raw: &str) -> Result<Self, DocumentError> {
        serde_saphyr::from_str(raw).map_err(|e| DocumentError::Parse(e.to_string()))
    }

    /// Read a definition file. `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    /// Returns [`DocumentError::Io`] when the file cannot be read and
    /// [`DocumentError::Parse`] when its content is malformed.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&raw)
        } else {
            Self::from_yaml(&raw)
        }
    }
}

const RESERVED: [&str; 3] = [VOCAB_ROUTE, "contexts", ENTRYPOINT];

impl ApiDocument {
    /// Validate `definition` and build the document served under `/{api_name}`.
    ///
    /// # Errors
    /// Returns a [`DocumentError`] for invalid names, duplicates and
    /// collections over unknown classes.
    pub fn from_definition(
        definition: DocumentDefinition,
        api_name: &str,
        base_url: &str,
    ) -> Result<Self, DocumentError> {
        let api_name = api_name.trim_matches('/');
        if api_name.is_empty() || api_name.contains('/') {
            return Err(DocumentError::InvalidApiName(api_name.to_owned()));
        }

        let mut parsed_classes = IndexMap::new();
        for class in definition.classes {
            if RESERVED.contains(&class.title.as_str()) {
                return Err(DocumentError::ReservedName(class.title));
            }
            if parsed_classes.contains_key(&class.title) {
                return Err(DocumentError::DuplicateClass(class.title));
            }
            parsed_classes.insert(
                class.title.clone(),
                ClassDescriptor {
                    title: class.title,
                    description: class.description,
                    supported_operations: class.supported_operations,
                    supported_properties: class.supported_properties,
                    endpoint: class.endpoint,
                },
            );
        }

        let mut collections: IndexMap<String, CollectionDescriptor> = IndexMap::new();
        for collection in definition.collections {
            let expected = format!("{}{COLLECTION_SUFFIX}", collection.class);
            let name = match collection.name {
                Some(name) if name != expected => {
                    return Err(DocumentError::CollectionName { name, expected });
                }
                _ => expected,
            };
            if !parsed_classes.contains_key(&collection.class) {
                return Err(DocumentError::UnknownClass {
                    collection: name,
                    class: collection.class,
                });
            }
            if RESERVED.contains(&name.as_str()) {
                return Err(DocumentError::ReservedName(name));
            }
            if collections.contains_key(&name) || parsed_classes.contains_key(&name) {
                return Err(DocumentError::DuplicateCollection(name));
            }
            let supported_operations = collection
                .supported_operations
                .unwrap_or_else(|| CollectionDescriptor::default_operations(&collection.class));
            let description = collection
                .description
                .unwrap_or_else(|| format!("A collection of {}", collection.class));
            collections.insert(
                name.clone(),
                CollectionDescriptor {
                    name,
                    class_title: collection.class,
                    description,
                    supported_operations,
                },
            );
        }

        let entrypoint = derive_entrypoint(api_name, &parsed_classes, &collections);

        let mut base_url = base_url.to_owned();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        tracing::debug!(
            api_name,
            classes = parsed_classes.len(),
            collections = collections.len(),
            links = entrypoint.len(),
            "api document built"
        );

        Ok(Self {
            api_name: api_name.to_owned(),
            base_url,
            title: definition.title,
            description: definition.description,
            parsed_classes,
            collections,
            entrypoint,
        })
    }
}

/// Collections first, then endpoint classes no `{Title}Collection` wraps.
fn derive_entrypoint(
    api_name: &str,
    classes: &IndexMap<String, ClassDescriptor>,
    collections: &IndexMap<String, CollectionDescriptor>,
) -> Vec<EntryPointLink> {
    let wrapped: HashSet<String> = collections
        .keys()
        .filter_map(|name| name.strip_suffix(COLLECTION_SUFFIX))
        .map(str::to_owned)
        .collect();

    let collection_links = collections.values().map(|c| EntryPointLink {
        name: c.name.clone(),
        route: format!("/{api_name}/{}", c.name),
        supported_operations: c.supported_operations.clone(),
    });
    let class_links = classes
        .values()
        .filter(|c| c.endpoint && !wrapped.contains(&c.title))
        .map(|c| EntryPointLink {
            name: c.title.clone(),
            route: format!("/{api_name}/{}", c.title),
            supported_operations: c.supported_operations.clone(),
        });

    collection_links.chain(class_links).collect()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::doc::model::Method;

    fn class(title: &str, endpoint: bool) -> ClassDefinition {
        ClassDefinition {
            title: title.to_owned(),
            description: String::new(),
            supported_operations: vec![SupportedOperation::new("get", Method::Get, None, None)],
            supported_properties: vec![],
            endpoint,
        }
    }

    fn collection(class: &str) -> CollectionDefinition {
        CollectionDefinition {
            class: class.to_owned(),
            name: None,
            description: None,
            supported_operations: None,
        }
    }

    #[test]
    fn entrypoint_lists_collections_then_endpoint_classes() {
        let def = DocumentDefinition {
            classes: vec![class("Drone", true), class("Area", true), class("Hidden", false)],
            collections: vec![collection("Drone")],
            ..Default::default()
        };
        let doc = ApiDocument::from_definition(def, "/api/", "http://localhost:8080").unwrap();

        let names: Vec<_> = doc.entrypoint().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["DroneCollection", "Area"]);
        assert_eq!(doc.entrypoint()[0].route, "/api/DroneCollection");
        assert_eq!(doc.base_url(), "http://localhost:8080/");
        assert_eq!(doc.api_name(), "api");
        assert!(doc.entrypoint()[0].supports(Method::Put));
    }

    #[test]
    fn unknown_collection_class_is_rejected() {
        let def = DocumentDefinition {
            collections: vec![collection("Ghost")],
            ..Default::default()
        };
        let err = ApiDocument::from_definition(def, "api", "http://x/").unwrap_err();
        assert!(matches!(err, DocumentError::UnknownClass { ref class, .. } if class == "Ghost"));
    }

    #[test]
    fn duplicates_and_reserved_names_are_rejected() {
        let def = DocumentDefinition {
            classes: vec![class("Drone", false), class("Drone", false)],
            ..Default::default()
        };
        assert!(matches!(
            ApiDocument::from_definition(def, "api", "http://x/"),
            Err(DocumentError::DuplicateClass(_))
        ));

        let def = DocumentDefinition {
            classes: vec![class("vocab", false)],
            ..Default::default()
        };
        assert!(matches!(
            ApiDocument::from_definition(def, "api", "http://x/"),
            Err(DocumentError::ReservedName(_))
        ));
    }

    #[test]
    fn collection_names_follow_the_class() {
        let mut fleet = collection("Drone");
        fleet.name = Some("Fleet".to_owned());
        let def = DocumentDefinition {
            classes: vec![class("Drone", true)],
            collections: vec![fleet],
            ..Default::default()
        };
        let err = ApiDocument::from_definition(def, "api", "http://x/").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::CollectionName { ref name, ref expected }
                if name == "Fleet" && expected == "DroneCollection"
        ));

        let mut explicit = collection("Drone");
        explicit.name = Some("DroneCollection".to_owned());
        let def = DocumentDefinition {
            classes: vec![class("Drone", true)],
            collections: vec![explicit],
            ..Default::default()
        };
        let doc = ApiDocument::from_definition(def, "api", "http://x/").unwrap();
        assert!(doc.is_collection("DroneCollection"));
        assert!(!doc.is_singleton_class("Drone"));
    }

    #[test]
    fn api_name_must_be_a_single_segment() {
        let err = ApiDocument::from_definition(DocumentDefinition::default(), "a/b", "http://x/")
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidApiName(_)));
    }

    #[test]
    fn yaml_definition_parses() {
        let yaml = r"
title: Tiny
classes:
  - title: Note
    endpoint: true
    supportedOperations:
      - title: Get note
        method: GET
    supportedProperties:
      - title: text
        property: vocab:text
        required: true
collections:
  - class: Note
";
        let def = DocumentDefinition::from_yaml(yaml).unwrap();
        let doc = ApiDocument::from_definition(def, "tiny", "http://x/").unwrap();
        assert!(doc.is_collection("NoteCollection"));
        assert!(!doc.is_singleton_class("Note"));
        assert_eq!(doc.class("Note").unwrap().supported_properties[0].title, "text");
        assert!(doc.class("Note").unwrap().supported_properties[0].writeable);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            DocumentDefinition::from_json("{ nope"),
            Err(DocumentError::Parse(_))
        ));
    }
}
