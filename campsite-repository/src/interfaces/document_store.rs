//! Document store trait definition.

use async_trait::async_trait;
use bson::Document;

use crate::errors::StoreError;
use crate::types::FindQuery;

/// Abstracts the underlying document store (MongoDB, in-memory, etc.).
///
/// Documents are addressed by collection name and, where it applies, by the
/// value of their `id` field. Implementations are shared behind an `Arc` by
/// the seeder and every request handler, so all methods take `&self` and must
/// be safe to call concurrently.
///
/// Documents returned by the store may contain the store-internal `_id`
/// field; callers that expose documents are responsible for removing it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Fetch the document whose `id` field equals `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(document))` - If a matching document exists
    /// * `Ok(None)` - If no document matches
    /// * `Err(StoreError)` - If the read fails
    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a single document.
    ///
    /// Fails with `StoreError::DuplicateKey` if a unique `id` index exists on
    /// the collection and the document's id is already taken.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Insert several documents in order and return how many were inserted.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError>;

    /// Set the given fields on the document whose `id` field equals `id`.
    ///
    /// Fields not named in `fields` are left untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If a document matched (whether or not any value changed)
    /// * `Ok(false)` - If no document matched
    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<bool, StoreError>;

    /// Count the documents in a collection.
    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    /// Fetch the documents matching `query`, sorted and limited as requested.
    async fn find_many(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<Document>, StoreError>;

    /// Ensure a unique index on the `id` field of a collection.
    ///
    /// Idempotent: calling it on a collection that already has the index
    /// succeeds.
    async fn ensure_unique_id(&self, collection: &str) -> Result<(), StoreError>;

    /// Release any resources held by the store.
    async fn shutdown(&self) {}
}
