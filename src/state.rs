//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CodeImageService, RedirectService, ShortenService};
use crate::config::ServiceSettings;
use crate::domain::rendering::ImageRenderer;
use crate::domain::repositories::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub code_image_service: Arc<CodeImageService>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Wires every service over the same store.
    pub fn new(
        store: Arc<dyn RecordStore>,
        renderer: Arc<dyn ImageRenderer>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(store.clone(), settings.clone())),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            code_image_service: Arc::new(CodeImageService::new(
                store.clone(),
                renderer,
                settings,
            )),
            store,
        }
    }
}
