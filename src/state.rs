//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::config::Config;
use crate::domain::repositories::RecordStore;

/// Services and the store handle shared by all requests.
///
/// Cheap to clone; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn RecordStore>>,
    pub redirect_service: Arc<RedirectService<dyn RecordStore>>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Builds both services around one store handle.
    pub fn new(store: Arc<dyn RecordStore>, domain: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(store.clone(), domain, max_attempts)),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            store,
        }
    }

    pub fn from_config(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self::new(store, config.domain.clone(), config.max_shorten_attempts)
    }
}
