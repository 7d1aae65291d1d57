//! In-memory document store for tests and local development.
//!
//! `InMemoryStore` mirrors the MongoDB semantics the content backend relies
//! on: an ObjectId `_id` is assigned on insert, filters are top-level
//! equality, sorts follow MongoDB's cross-type ordering and are stable, and
//! unique `id` indexes are enforced once requested.
//!
//! # Example
//!
//! ```
//! use campsite_repository::{doc, DocumentStore, InMemoryStore};
//!
//! # async fn example() -> Result<(), campsite_repository::StoreError> {
//! let store = InMemoryStore::new();
//! store.insert_one("rules", doc! { "id": "rule_1", "order": 1 }).await?;
//!
//! assert_eq!(store.count("rules").await?, 1);
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tracing::debug;

use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use crate::types::{FindQuery, SortOrder, ID_FIELD, INTERNAL_ID_FIELD};

#[derive(Default)]
struct Collections {
    /// Collection name -> documents in insertion order.
    documents: HashMap<String, Vec<Document>>,
    /// Collections with a unique index on `id`.
    unique_ids: HashSet<String>,
}

/// Process-local document store.
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collections::default()),
        }
    }

    /// Snapshot of a collection's documents in insertion order, `_id` included.
    pub fn documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .read()?
            .documents
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::connection("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::connection("in-memory store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Collections {
    fn insert(&mut self, collection: &str, document: Document) -> Result<(), StoreError> {
        if self.unique_ids.contains(collection) {
            let id = indexed_id(&document);
            let taken = self
                .documents
                .get(collection)
                .is_some_and(|docs| docs.iter().any(|doc| indexed_id(doc) == id));
            if taken {
                return Err(StoreError::duplicate_key(collection, &id_label(&id)));
            }
        }

        self.documents
            .entry(collection.to_string())
            .or_default()
            .push(with_internal_id(document));
        Ok(())
    }
}

/// Value a unique `id` index holds for a document. A missing field indexes as null.
fn indexed_id(document: &Document) -> Bson {
    document.get(ID_FIELD).cloned().unwrap_or(Bson::Null)
}

fn id_label(id: &Bson) -> String {
    id.as_str().map_or_else(|| id.to_string(), str::to_string)
}

/// Put a fresh `_id` first in the document unless it already carries one.
fn with_internal_id(document: Document) -> Document {
    if document.contains_key(INTERNAL_ID_FIELD) {
        return document;
    }
    let mut stored = Document::new();
    stored.insert(INTERNAL_ID_FIELD, ObjectId::new());
    for (field, value) in document {
        stored.insert(field, value);
    }
    stored
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

/// Rank of a BSON type in MongoDB's cross-type sort order.
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 0,
        Some(Bson::Int32(_)) | Some(Bson::Int64(_)) | Some(Bson::Double(_)) => 1,
        Some(Bson::String(_)) | Some(Bson::Symbol(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::Binary(_)) => 5,
        Some(Bson::ObjectId(_)) => 6,
        Some(Bson::Boolean(_)) => 7,
        Some(Bson::DateTime(_)) => 8,
        Some(Bson::Timestamp(_)) => 9,
        Some(_) => 10,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let by_type = type_rank(a).cmp(&type_rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => {
            x.timestamp_millis().cmp(&y.timestamp_millis())
        }
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let inner = self.read()?;
        let found = inner.documents.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| doc.get_str(ID_FIELD).is_ok_and(|value| value == id))
                .cloned()
        });
        Ok(found)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.write()?.insert(collection, document)?;
        debug!(collection = %collection, "Inserted document");
        Ok(())
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError> {
        let mut inner = self.write()?;
        let mut inserted = 0;
        for document in documents {
            inner.insert(collection, document)?;
            inserted += 1;
        }
        debug!(collection = %collection, inserted, "Inserted documents");
        Ok(inserted)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        let target = inner.documents.get_mut(collection).and_then(|docs| {
            docs.iter_mut()
                .find(|doc| doc.get_str(ID_FIELD).is_ok_and(|value| value == id))
        });

        match target {
            Some(document) => {
                for (field, value) in fields {
                    document.insert(field, value);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .documents
            .get(collection)
            .map_or(0, |docs| docs.len() as u64))
    }

    async fn find_many(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let inner = self.read()?;
        let mut matched: Vec<Document> = inner
            .documents
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = compare_bson(a.get(&sort.field), b.get(&sort.field));
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        // A zero limit means "no limit", as it does for MongoDB.
        if let Some(limit) = query.limit.filter(|limit| *limit != 0) {
            matched.truncate(limit.unsigned_abs() as usize);
        }

        Ok(matched)
    }

    async fn ensure_unique_id(&self, collection: &str) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        let docs = inner.documents.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let mut seen = HashSet::new();
        for id in docs.iter().map(indexed_id) {
            if !seen.insert(id.to_string()) {
                return Err(StoreError::duplicate_key(collection, &id_label(&id)));
            }
        }

        inner.unique_ids.insert(collection.to_string());
        Ok(())
    }
}
