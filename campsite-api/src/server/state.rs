// Shared state handed to every handler
use std::sync::Arc;

use campsite_repository::DocumentStore;

use crate::content::ContentService;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            content: Arc::new(ContentService::new(store)),
        }
    }
}
