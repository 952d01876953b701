//! JSON-LD rendering of an [`ApiDocument`].

use serde_json::{Map, Value, json};

use super::model::{
    ApiDocument, ClassDescriptor, CollectionDescriptor, ENTRYPOINT,
    PropertyDescriptor, SupportedOperation, VOCAB_PREFIX,
};

pub const HYDRA_NS: &str = "http://www.w3.org/ns/hydra/core#";
const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const XSD_NS: &str = "https://www.w3.org/TR/xmlschema-2/#";

impl ApiDocument {
    /// The `ApiDocumentation` served at `/{api}/vocab`.
    #[must_use]
    pub fn vocab(&self) -> Value {
        let mut supported: Vec<Value> = self.parsed_classes.values().map(class_entry).collect();
        supported.extend(self.collections.values().map(collection_entry));
        supported.push(self.entrypoint_class());

        json!({
            "@context": self.vocab_context(),
            "@id": self.vocab_url(),
            "@type": "ApiDocumentation",
            "title": self.title,
            "description": self.description,
            "supportedClass": supported,
            "possibleStatus": [],
            "entrypoint": format!("{}{}", self.base_url, self.api_name),
        })
    }

    /// `@context` for instances of class `title`.
    #[must_use]
    pub fn class_context(&self, title: &str) -> Option<Value> {
        let class = self.class(title)?;
        let mut ctx = self.base_context();
        ctx.insert(class.title.clone(), vocab_term(&class.title));
        for prop in &class.supported_properties {
            ctx.insert(prop.title.clone(), Value::String(prop.property.clone()));
        }
        Some(Value::Object(ctx))
    }

    /// `@context` for the member listing of collection `name`.
    #[must_use]
    pub fn collection_context(&self, name: &str) -> Option<Value> {
        let collection = self.collection(name)?;
        let mut ctx = self.base_context();
        ctx.insert(collection.name.clone(), vocab_term(&collection.name));
        ctx.insert(
            "members".to_owned(),
            json!({ "@id": format!("{HYDRA_NS}member"), "@type": "@id" }),
        );
        Some(Value::Object(ctx))
    }

    /// `@context` of the entry point body.
    #[must_use]
    pub fn entrypoint_context(&self) -> Value {
        let mut ctx = self.base_context();
        ctx.insert(ENTRYPOINT.to_owned(), vocab_term(ENTRYPOINT));
        for link in &self.entrypoint {
            let id = format!("{VOCAB_PREFIX}{ENTRYPOINT}/{}", link.name);
            ctx.insert(link.name.clone(), json!({ "@id": id, "@type": "@id" }));
        }
        Value::Object(ctx)
    }

    /// Entry point body: one `name -> /{api}/{name}` pair per link.
    #[must_use]
    pub fn entrypoint_body(&self) -> Value {
        let api = &self.api_name;
        let mut body = Map::new();
        body.insert(
            "@context".to_owned(),
            Value::String(format!("/{api}/contexts/{ENTRYPOINT}.jsonld")),
        );
        body.insert("@id".to_owned(), Value::String(format!("/{api}")));
        body.insert("@type".to_owned(), Value::String(ENTRYPOINT.to_owned()));
        for link in &self.entrypoint {
            body.insert(link.name.clone(), Value::String(link.route.clone()));
        }
        Value::Object(body)
    }

    fn base_context(&self) -> Map<String, Value> {
        let mut ctx = Map::new();
        ctx.insert("hydra".to_owned(), Value::String(HYDRA_NS.to_owned()));
        ctx.insert("vocab".to_owned(), Value::String(format!("{}#", self.vocab_url())));
        ctx
    }

    fn vocab_context(&self) -> Value {
        let id_ref = |term: &str| json!({ "@id": term, "@type": "@id" });
        json!({
            "vocab": format!("{}#", self.vocab_url()),
            "hydra": HYDRA_NS,
            "rdf": RDF_NS,
            "rdfs": RDFS_NS,
            "xsd": XSD_NS,
            "ApiDocumentation": "hydra:ApiDocumentation",
            "title": "hydra:title",
            "description": "hydra:description",
            "label": "rdfs:label",
            "domain": id_ref("rdfs:domain"),
            "range": id_ref("rdfs:range"),
            "subClassOf": id_ref("rdfs:subClassOf"),
            "supportedClass": "hydra:supportedClass",
            "supportedProperty": "hydra:supportedProperty",
            "supportedOperation": "hydra:supportedOperation",
            "property": id_ref("hydra:property"),
            "required": "hydra:required",
            "readable": "hydra:readable",
            "writeable": "hydra:writeable",
            "method": "hydra:method",
            "expects": id_ref("hydra:expects"),
            "returns": id_ref("hydra:returns"),
            "possibleStatus": "hydra:possibleStatus",
            "entrypoint": id_ref("hydra:entrypoint"),
        })
    }

    fn entrypoint_class(&self) -> Value {
        let properties: Vec<Value> = self
            .entrypoint
            .iter()
            .map(|link| {
                json!({
                    "@type": "SupportedProperty",
                    "title": link.name,
                    "property": {
                        "@id": format!("{VOCAB_PREFIX}{ENTRYPOINT}/{}", link.name),
                        "@type": "hydra:Link",
                        "label": link.name,
                        "range": vocab_term(&link.name),
                        "domain": vocab_term(ENTRYPOINT),
                        "supportedOperation": operation_entries(&link.supported_operations),
                    },
                    "required": Value::Null,
                    "readable": true,
                    "writeable": false,
                })
            })
            .collect();

        json!({
            "@id": vocab_term(ENTRYPOINT),
            "@type": "hydra:Class",
            "title": ENTRYPOINT,
            "description": "The main entry point or homepage of the API.",
            "supportedOperation": [{
                "@id": "_:entry_point",
                "@type": "hydra:Operation",
                "method": "GET",
                "label": "The APIs main entry point.",
                "expects": Value::Null,
                "returns": vocab_term(ENTRYPOINT),
                "possibleStatus": [],
            }],
            "supportedProperty": properties,
        })
    }
}

fn vocab_term(name: &str) -> Value {
    Value::String(format!("{VOCAB_PREFIX}{name}"))
}

fn operation_entries(ops: &[SupportedOperation]) -> Vec<Value> {
    ops.iter().map(operation_entry).collect()
}

fn operation_entry(op: &SupportedOperation) -> Value {
    json!({
        "@type": "hydra:Operation",
        "title": op.title,
        "method": op.method.as_str(),
        "expects": op.expects,
        "returns": op.returns,
        "possibleStatus": [],
    })
}

fn property_entry(prop: &PropertyDescriptor) -> Value {
    json!({
        "@type": "SupportedProperty",
        "title": prop.title,
        "property": prop.property,
        "required": prop.required,
        "readable": prop.readable,
        "writeable": prop.writeable,
    })
}

fn class_entry(class: &ClassDescriptor) -> Value {
    json!({
        "@id": vocab_term(&class.title),
        "@type": "hydra:Class",
        "title": class.title,
        "description": class.description,
        "supportedOperation": operation_entries(&class.supported_operations),
        "supportedProperty": class
            .supported_properties
            .iter()
            .map(property_entry)
            .collect::<Vec<_>>(),
    })
}

fn collection_entry(collection: &CollectionDescriptor) -> Value {
    json!({
        "@id": vocab_term(&collection.name),
        "@type": "hydra:Class",
        "subClassOf": format!("{HYDRA_NS}Collection"),
        "title": collection.name,
        "description": collection.description,
        "supportedOperation": operation_entries(&collection.supported_operations),
        "supportedProperty": [{
            "@type": "SupportedProperty",
            "title": "members",
            "property": format!("{HYDRA_NS}member"),
            "required": false,
            "readable": true,
            "writeable": true,
        }],
    })
}
