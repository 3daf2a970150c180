use std::sync::Arc;

use crate::cache::RelationalCache;
use crate::client::{ApiClient, Transport};
use crate::toast::Toaster;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub cache: Arc<RelationalCache>,
    pub toaster: Toaster,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let toaster = Toaster::new();
        Self {
            api: ApiClient::new(transport, toaster.clone()),
            cache: Arc::new(RelationalCache::new()),
            toaster,
        }
    }
}
