use std::sync::Arc;

use crate::config::Config;
use crate::repository::EventStore;
use crate::services::uploader::MediaUploader;
use crate::views::ViewVersions;

/// Shared application state, cloned per handler. The store and uploader sit
/// behind trait objects so handlers can be exercised against mocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn EventStore>,
    pub uploader: Arc<dyn MediaUploader>,
    pub views: ViewVersions,
}
