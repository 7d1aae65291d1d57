//! # Campsite Repository
//!
//! This crate provides the document store abstraction used by the campsite
//! content backend. It includes the error type, the `DocumentStore` trait, a
//! MongoDB implementation and an in-memory implementation for tests and local
//! development.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod mongo;
pub mod types;
pub mod utils;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use interfaces::DocumentStore;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use types::{FindQuery, SortOrder, SortSpec, ID_FIELD, INTERNAL_ID_FIELD};
pub use utils::{bson_to_json, document_to_json, strip_internal_id};

pub use bson::{doc, Bson, Document};
