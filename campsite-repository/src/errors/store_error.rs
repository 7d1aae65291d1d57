//! Document store error types.

use thiserror::Error;

/// Unified errors from document store operations.
///
/// Used by the `DocumentStore` trait and every implementation of it. Backend
/// errors are flattened to strings so the type stays `Clone` and independent
/// of the driver in use.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Failed to reach the store or select a server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A read or count failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// An insert or update failed.
    #[error("Write error: {0}")]
    WriteError(String),

    /// An insert collided with a unique index.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Failed to convert a value to or from the store's document format.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid store configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a duplicate key error for a document id in a collection.
    pub fn duplicate_key(collection: &str, id: &str) -> Self {
        Self::DuplicateKey(format!("collection={}, id={}", collection, id))
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Returns true if the error is a unique index violation.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = StoreError::duplicate_key("contact_info", "contact_info");
        assert!(err.is_duplicate_key());
        assert_eq!(
            err.to_string(),
            "Duplicate key: collection=contact_info, id=contact_info"
        );
    }

    #[test]
    fn test_other_errors_are_not_duplicate_key() {
        assert!(!StoreError::write("boom").is_duplicate_key());
        assert!(!StoreError::connection("down").is_duplicate_key());
    }
}
