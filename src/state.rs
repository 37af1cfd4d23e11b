// state.rs
use std::sync::Arc;

use crate::cache::ViewCache;
use crate::store::PollStore;

pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub views: ViewCache,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            views: ViewCache::default(),
        })
    }
}
