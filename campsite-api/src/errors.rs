//! Error types for the content API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campsite_repository::StoreError;
use campsite_shared::Collection;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors returned by read operations.
#[derive(Error, Debug)]
pub enum ContentError {
    /// A singleton page has not been created yet.
    #[error("{0}")]
    NotFound(String),

    /// The store failed while serving the request.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ContentError {
    /// Create a not found error for a page, e.g. `"Camping info not found"`.
    pub fn not_found(label: &str) -> Self {
        Self::NotFound(format!("{} not found", label))
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ContentError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ContentError::Store(e) => {
                error!(error = %e, "Store error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Errors that abort startup seeding.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The store failed while checking or writing a collection.
    #[error("Failed to seed {collection}: {source}")]
    Store {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    /// Default content could not be converted to a store document.
    #[error("Failed to serialize default content for {collection}: {message}")]
    Serialization {
        collection: Collection,
        message: String,
    },
}

impl SeedError {
    /// Create a store error for a collection.
    pub fn store(collection: Collection, source: StoreError) -> Self {
        Self::Store { collection, source }
    }

    /// Create a serialization error for a collection.
    pub fn serialization(collection: Collection, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            collection,
            message: err.to_string(),
        }
    }
}
