//! Configuration and dependency initialization for the content API.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{ApiConfig, CorsOrigins, LogFormat, StoreBackend};
