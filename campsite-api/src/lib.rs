//! # Campsite API
//!
//! Content API for the Birchwood campsite website. Seeds the default site
//! content into the document store at startup and serves it read-only over
//! HTTP.
//!
//! ## Architecture
//!
//! 1. **Seeder**: ensures the singleton pages and the default rules exist
//! 2. **ContentService**: reads documents and shapes them for clients
//! 3. **Server**: axum routes mapping HTTP requests onto the content service
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`defaults`]: Canonical content written by the seeder
//! - [`seeder`]: Idempotent startup seeding
//! - [`content`]: Read operations over the stored content
//! - [`server`]: HTTP routing, handlers and shared state
//! - [`errors`]: Error types for reads and seeding

pub mod config;
pub mod content;
pub mod defaults;
pub mod errors;
pub mod seeder;
pub mod server;

pub use config::{ApiConfig, Dependencies};
pub use content::ContentService;
pub use errors::{ContentError, SeedError};
pub use seeder::{SeedOutcome, SeedReport, Seeder};

use campsite_repository::StoreError;
use thiserror::Error;

/// Errors that can occur while starting or running the API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The store could not be reached or initialized.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Startup seeding failed.
    #[error("Seed error: {0}")]
    SeedError(#[from] SeedError),

    /// The HTTP server failed to bind or stopped with an error.
    #[error("Server error: {0}")]
    ServerError(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::ServerError(msg.into())
    }
}
