// cache.rs
use std::collections::HashSet;
use std::sync::Mutex;

use tracing::debug;

/// Stale-view bookkeeping. Workflows mark a path-like key stale after
/// a successful write; read handlers clear the key when they serve
/// fresh data. The key is the whole signal, there is no payload.
#[derive(Debug, Default)]
pub struct ViewCache {
    stale: Mutex<HashSet<String>>,
}

impl ViewCache {
    pub fn invalidate(&self, path: &str) {
        debug!(path, "view invalidated");
        self.stale.lock().unwrap().insert(path.to_string());
    }

    pub fn refresh(&self, path: &str) {
        self.stale.lock().unwrap().remove(path);
    }

    pub fn is_stale(&self, path: &str) -> bool {
        self.stale.lock().unwrap().contains(path)
    }
}
