//! In-process storage backend validated against the document's classes.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::doc::ApiDocument;
use crate::domain::storage::{MemberRef, Object, StorageError, StorageProvider, StorageSession};

#[derive(Debug, Clone)]
struct Instance {
    class: String,
    properties: Object,
}

#[derive(Debug)]
struct Inner {
    /// Next automatic id; `None` once an instance holds `u64::MAX`.
    next_id: Option<u64>,
    instances: BTreeMap<u64, Instance>,
}

impl Inner {
    fn auto_id(&self) -> Result<u64, StorageError> {
        self.next_id
            .ok_or_else(|| StorageError::Internal("instance ids exhausted".to_owned()))
    }

    /// Store a new instance at `id` and move the counter past it.
    fn claim(&mut self, id: u64, instance: Instance) {
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        self.instances.insert(id, instance);
    }
}

/// Class title -> property titles.
type Schema = HashMap<String, HashSet<String>>;

/// Instances kept in an ordered map behind a mutex.
#[derive(Clone)]
pub struct MemoryStorage {
    schema: Arc<Schema>,
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new(doc: &ApiDocument) -> Self {
        let schema = doc
            .classes()
            .values()
            .map(|c| {
                (
                    c.title.clone(),
                    c.property_titles().map(str::to_owned).collect(),
                )
            })
            .collect();
        Self {
            schema: Arc::new(schema),
            inner: Arc::new(Mutex::new(Inner {
                next_id: Some(1),
                instances: BTreeMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("classes", &self.schema.len())
            .field("instances", &self.len())
            .finish_non_exhaustive()
    }
}

impl StorageProvider for MemoryStorage {
    fn open_session(&self) -> Result<Box<dyn StorageSession>, StorageError> {
        Ok(Box::new(MemorySession {
            schema: Arc::clone(&self.schema),
            inner: Arc::clone(&self.inner),
            _not_sync: PhantomData,
        }))
    }
}

/// Per-request view of a [`MemoryStorage`]. `Send` but not `Sync`.
pub struct MemorySession {
    schema: Arc<Schema>,
    inner: Arc<Mutex<Inner>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl MemorySession {
    fn ensure_class(&self, type_name: &str) -> Result<(), StorageError> {
        if self.schema.contains_key(type_name) {
            Ok(())
        } else {
            Err(StorageError::ClassNotFound(type_name.to_owned()))
        }
    }

    /// Check `@type` and property names, returning the class and stored properties.
    fn validate(&self, object: &Object) -> Result<(String, Object), StorageError> {
        let class = match object.get("@type") {
            Some(Value::String(t)) => t.clone(),
            _ => return Err(StorageError::InvalidObject("missing @type".to_owned())),
        };
        let properties = self
            .schema
            .get(&class)
            .ok_or_else(|| StorageError::ClassNotFound(class.clone()))?;

        let mut stored = Object::new();
        for (key, value) in object {
            if key.starts_with('@') {
                continue;
            }
            if !properties.contains(key) {
                return Err(StorageError::PropertyNotFound {
                    property: key.clone(),
                    class,
                });
            }
            stored.insert(key.clone(), value.clone());
        }
        Ok((class, stored))
    }
}

fn first_of(inner: &Inner, type_name: &str) -> Option<u64> {
    inner
        .instances
        .iter()
        .find(|(_, i)| i.class == type_name)
        .map(|(id, _)| *id)
}

#[async_trait]
impl StorageSession for MemorySession {
    async fn get(&mut self, id: u64, type_name: &str) -> Result<Object, StorageError> {
        self.ensure_class(type_name)?;
        let inner = self.inner.lock();
        inner
            .instances
            .get(&id)
            .filter(|i| i.class == type_name)
            .map(|i| i.properties.clone())
            .ok_or_else(|| StorageError::InstanceNotFound {
                type_name: type_name.to_owned(),
                id,
            })
    }

    async fn get_collection(&mut self, type_name: &str) -> Result<Vec<MemberRef>, StorageError> {
        self.ensure_class(type_name)?;
        let inner = self.inner.lock();
        Ok(inner
            .instances
            .iter()
            .filter(|(_, i)| i.class == type_name)
            .map(|(id, i)| MemberRef {
                id: *id,
                type_name: i.class.clone(),
            })
            .collect())
    }

    async fn get_single(&mut self, type_name: &str) -> Result<(u64, Object), StorageError> {
        self.ensure_class(type_name)?;
        let inner = self.inner.lock();
        first_of(&inner, type_name)
            .and_then(|id| inner.instances.get(&id).map(|i| (id, i.properties.clone())))
            .ok_or_else(|| StorageError::NotInstanceOfType(type_name.to_owned()))
    }

    async fn insert(&mut self, object: &Object, id: Option<u64>) -> Result<u64, StorageError> {
        let (class, properties) = self.validate(object)?;
        let mut inner = self.inner.lock();
        let id = match id {
            Some(id) if inner.instances.contains_key(&id) => {
                return Err(StorageError::InstanceExists(id));
            }
            Some(id) => id,
            None => inner.auto_id()?,
        };
        inner.claim(id, Instance { class, properties });
        tracing::debug!(id, "instance inserted");
        Ok(id)
    }

    async fn update(
        &mut self,
        object: &Object,
        id: u64,
        type_name: &str,
    ) -> Result<u64, StorageError> {
        self.ensure_class(type_name)?;
        let (class, properties) = self.validate(object)?;
        let mut inner = self.inner.lock();
        match inner.instances.get_mut(&id) {
            Some(existing) if existing.class == type_name => {
                *existing = Instance { class, properties };
                tracing::debug!(id, "instance updated");
                Ok(id)
            }
            _ => Err(StorageError::InstanceNotFound {
                type_name: type_name.to_owned(),
                id,
            }),
        }
    }

    async fn update_single(
        &mut self,
        object: &Object,
        type_name: &str,
    ) -> Result<(), StorageError> {
        self.ensure_class(type_name)?;
        let (class, properties) = self.validate(object)?;
        let mut inner = self.inner.lock();
        let instance = Instance { class, properties };
        match first_of(&inner, type_name) {
            Some(id) => {
                inner.instances.insert(id, instance);
            }
            None => {
                let id = inner.auto_id()?;
                inner.claim(id, instance);
            }
        }
        Ok(())
    }

    async fn delete(&mut self, id: u64, type_name: &str) -> Result<(), StorageError> {
        self.ensure_class(type_name)?;
        let mut inner = self.inner.lock();
        if inner.instances.get(&id).is_some_and(|i| i.class == type_name) {
            inner.instances.remove(&id);
            tracing::debug!(id, "instance deleted");
            Ok(())
        } else {
            Err(StorageError::InstanceNotFound {
                type_name: type_name.to_owned(),
                id,
            })
        }
    }

    async fn delete_single(&mut self, type_name: &str) -> Result<(), StorageError> {
        self.ensure_class(type_name)?;
        let mut inner = self.inner.lock();
        let id = first_of(&inner, type_name)
            .ok_or_else(|| StorageError::NotInstanceOfType(type_name.to_owned()))?;
        inner.instances.remove(&id);
        Ok(())
    }
}
