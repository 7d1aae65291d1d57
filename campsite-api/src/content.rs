//! Read operations over the stored site content.
//!
//! Every read returns plain JSON with the store-internal `_id` removed. All
//! other stored fields are passed through, including ones an operator added
//! by hand.

use std::sync::Arc;

use campsite_repository::{document_to_json, DocumentStore, FindQuery, SortOrder, StoreError};
use campsite_shared::{
    CampingInfo, Collection, ContactInfo, FishingInfo, GalleryCategory, SingletonDocument,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ContentError;

/// Message returned by the root route.
pub const ROOT_MESSAGE: &str = "Birchwood Camping & Fishing API";

/// Upper bound on documents returned by a list read.
pub const MAX_LIST_RESULTS: i64 = 100;

/// Read-only view of the site content.
pub struct ContentService {
    store: Arc<dyn DocumentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn root(&self) -> Value {
        json!({ "message": ROOT_MESSAGE })
    }

    pub async fn camping(&self) -> Result<Value, ContentError> {
        self.singleton::<CampingInfo>().await
    }

    pub async fn fishing(&self) -> Result<Value, ContentError> {
        self.singleton::<FishingInfo>().await
    }

    pub async fn contact(&self) -> Result<Value, ContentError> {
        self.singleton::<ContactInfo>().await
    }

    /// All rules, lowest `order` first.
    pub async fn rules(&self) -> Result<Vec<Value>, ContentError> {
        let query = FindQuery::all()
            .sort_by("order", SortOrder::Ascending)
            .limit(MAX_LIST_RESULTS);
        self.list(Collection::Rules, &query).await
    }

    /// Gallery images, newest first, optionally restricted to one category.
    ///
    /// The category is matched exactly against the stored value. A name that
    /// is not a known category is still used as a filter and simply matches
    /// nothing.
    pub async fn gallery(&self, category: Option<&str>) -> Result<Vec<Value>, ContentError> {
        let mut query = FindQuery::all()
            .sort_by("created_at", SortOrder::Descending)
            .limit(MAX_LIST_RESULTS);

        if let Some(category) = category {
            if GalleryCategory::parse(category).is_none() {
                debug!(category = %category, "Gallery filter is not a known category");
            }
            query = query.filter_eq("category", category);
        }

        self.list(Collection::Gallery, &query).await
    }

    /// Check that the store answers.
    pub async fn health(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    async fn singleton<T: SingletonDocument>(&self) -> Result<Value, ContentError> {
        self.store
            .find_one(T::COLLECTION.as_str(), T::ID)
            .await?
            .map(document_to_json)
            .ok_or_else(|| ContentError::not_found(T::LABEL))
    }

    async fn list(
        &self,
        collection: Collection,
        query: &FindQuery,
    ) -> Result<Vec<Value>, ContentError> {
        let documents = self.store.find_many(collection.as_str(), query).await?;
        debug!(collection = %collection, count = documents.len(), "Listed documents");
        Ok(documents.into_iter().map(document_to_json).collect())
    }
}
