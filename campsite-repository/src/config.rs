//! Connection settings for the MongoDB store.

/// Default application name reported to the MongoDB server.
pub const DEFAULT_APP_NAME: &str = "campsite-api";

/// Configuration for `MongoStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// MongoDB connection string (e.g. `mongodb://localhost:27017`).
    pub url: String,
    /// Database holding the content collections.
    pub database: String,
    /// Application name sent in the connection handshake.
    pub app_name: String,
}

impl StoreConfig {
    /// Create a config with the default application name.
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    /// Override the application name reported to the server.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }
}
