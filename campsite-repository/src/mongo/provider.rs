//! MongoDB provider implementation.
//!
//! This module provides the concrete implementation of `DocumentStore`
//! using the official MongoDB Rust driver.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};
use tracing::{debug, error, info};

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use crate::types::{FindQuery, ID_FIELD};

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB provider implementation.
///
/// Wraps a driver `Client`, which maintains its own connection pool, so a
/// single `MongoStore` can be shared by every request handler.
///
/// # Example
///
/// ```no_run
/// use campsite_repository::{DocumentStore, MongoStore, StoreConfig};
///
/// # async fn example() -> Result<(), campsite_repository::StoreError> {
/// let config = StoreConfig::new("mongodb://localhost:27017", "birchwood");
/// let store = MongoStore::connect(&config).await?;
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Create a new MongoDB store for the configured database.
    ///
    /// The driver connects lazily, so this only fails on an invalid
    /// connection string. Call `ping` to verify the server is reachable.
    ///
    /// # Arguments
    ///
    /// * `config` - Connection string, database name and application name
    ///
    /// # Returns
    ///
    /// * `Ok(MongoStore)` - A new store instance
    /// * `Err(StoreError::ConfigError)` - If the connection string is invalid
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.database.is_empty() {
            return Err(StoreError::config("database name is required"));
        }

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| StoreError::config(format!("invalid MongoDB connection string: {}", e)))?;
        options.app_name = Some(config.app_name.clone());

        let client =
            Client::with_options(options).map_err(|e| StoreError::config(e.to_string()))?;
        let database = client.database(&config.database);

        info!(
            database = %config.database,
            app_name = %config.app_name,
            "Created MongoDB store"
        );

        Ok(Self { client, database })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

/// True for a unique index violation, whether reported by a write or by
/// building an index over existing duplicates.
fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn is_connection_failure(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_)
    )
}

/// Map a driver error, reporting unreachable servers as connection errors.
fn classify(err: MongoError, otherwise: impl FnOnce(String) -> StoreError) -> StoreError {
    if is_connection_failure(&err) {
        StoreError::connection(err.to_string())
    } else {
        otherwise(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;
        debug!("MongoDB ping succeeded");
        Ok(())
    }

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.collection(collection)
            .find_one(doc! { ID_FIELD: id })
            .await
            .map_err(|e| {
                error!(collection = %collection, id = %id, error = %e, "find_one failed");
                classify(e, StoreError::query)
            })
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let id = document.get_str(ID_FIELD).unwrap_or_default().to_string();

        match self.collection(collection).insert_one(document).await {
            Ok(_) => {
                debug!(collection = %collection, id = %id, "Inserted document");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(StoreError::duplicate_key(collection, &id)),
            Err(e) => {
                error!(collection = %collection, id = %id, error = %e, "insert_one failed");
                Err(classify(e, StoreError::write))
            }
        }
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection(collection)
            .insert_many(documents)
            .await
            .map_err(|e| {
                error!(collection = %collection, error = %e, "insert_many failed");
                classify(e, StoreError::write)
            })?;

        debug!(
            collection = %collection,
            inserted = result.inserted_ids.len(),
            "Inserted documents"
        );
        Ok(result.inserted_ids.len())
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<bool, StoreError> {
        let result = self
            .collection(collection)
            .update_one(doc! { ID_FIELD: id }, doc! { "$set": fields })
            .await
            .map_err(|e| {
                error!(collection = %collection, id = %id, error = %e, "update_one failed");
                classify(e, StoreError::write)
            })?;

        debug!(
            collection = %collection,
            id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Updated document fields"
        );
        Ok(result.matched_count > 0)
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| {
                error!(collection = %collection, error = %e, "count_documents failed");
                classify(e, StoreError::query)
            })
    }

    async fn find_many(
        &self,
        collection: &str,
        query: &FindQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self.collection(collection);
        let mut find = coll.find(query.filter.clone());
        if let Some(sort) = query.sort_document() {
            find = find.sort(sort);
        }
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }

        let cursor = find.await.map_err(|e| {
            error!(collection = %collection, error = %e, "find failed");
            classify(e, StoreError::query)
        })?;

        cursor.try_collect().await.map_err(|e| {
            error!(collection = %collection, error = %e, "cursor iteration failed");
            classify(e, StoreError::query)
        })
    }

    async fn ensure_unique_id(&self, collection: &str) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { ID_FIELD: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.collection(collection).create_index(index).await {
            Ok(_) => {}
            Err(e) if is_duplicate_key(&e) => {
                return Err(StoreError::DuplicateKey(format!(
                    "collection={}, {}",
                    collection, e
                )));
            }
            Err(e) => {
                error!(collection = %collection, error = %e, "create_index failed");
                return Err(classify(e, StoreError::write));
            }
        }

        info!(collection = %collection, "Ensured unique id index");
        Ok(())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::error::{CommandError, WriteError};

    fn write_error(code: i32) -> MongoError {
        let write_error: WriteError =
            bson::from_document(doc! { "code": code, "errmsg": "E11000 duplicate key error" })
                .unwrap();
        MongoError::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    fn command_error(code: i32) -> MongoError {
        let command_error: CommandError =
            bson::from_document(doc! { "code": code, "errmsg": "index build failed" }).unwrap();
        MongoError::from(ErrorKind::Command(command_error))
    }

    fn io_error() -> MongoError {
        MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }

    #[test]
    fn test_duplicate_key_write_error() {
        assert!(is_duplicate_key(&write_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&write_error(121)));
    }

    #[test]
    fn test_duplicate_key_command_error() {
        assert!(is_duplicate_key(&command_error(DUPLICATE_KEY_CODE)));
        assert!(!is_duplicate_key(&command_error(13)));
    }

    #[test]
    fn test_io_error_is_not_duplicate_key() {
        assert!(!is_duplicate_key(&io_error()));
    }

    #[test]
    fn test_classify_io_as_connection() {
        let err = classify(io_error(), StoreError::query);
        assert!(matches!(err, StoreError::ConnectionError(_)));
    }

    #[test]
    fn test_classify_other_errors_use_fallback() {
        let err = classify(command_error(13), StoreError::query);
        assert!(matches!(err, StoreError::QueryError(_)));

        let err = classify(write_error(121), StoreError::write);
        assert!(matches!(err, StoreError::WriteError(_)));
    }
}
