use std::sync::Arc;

use crate::messaging::Directory;
use crate::services::MessageStore;

/// Shared handler state. Both seams are trait objects so the endpoint can be
/// exercised against in-memory lookups and stores.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub store: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(directory: Arc<dyn Directory>, store: Arc<dyn MessageStore>) -> Self {
        Self { directory, store }
    }
}
