use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// The listing view invalidated after a successful event creation.
pub const EVENT_LISTING_VIEW: &str = "/";

/// Per-route staleness counters. Creation bumps the counter for the views it
/// invalidates; readers compare versions to know whether a cached rendering
/// is stale. The server itself keeps no cached responses.
#[derive(Clone, Default)]
pub struct ViewVersions {
    inner: Arc<RwLock<HashMap<String, u64>>>,
}

impl ViewVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a view stale. Returns the new version.
    pub fn invalidate(&self, path: &str) -> u64 {
        let mut versions = self.inner.write().expect("view version lock poisoned");
        let entry = versions.entry(path.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of a view; 0 if it was never invalidated.
    pub fn version(&self, path: &str) -> u64 {
        let versions = self.inner.read().expect("view version lock poisoned");
        versions.get(path).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_view_has_version_zero() {
        let views = ViewVersions::new();
        assert_eq!(views.version(EVENT_LISTING_VIEW), 0);
    }

    #[test]
    fn invalidate_bumps_the_version() {
        let views = ViewVersions::new();
        assert_eq!(views.invalidate(EVENT_LISTING_VIEW), 1);
        assert_eq!(views.invalidate(EVENT_LISTING_VIEW), 2);
        assert_eq!(views.version(EVENT_LISTING_VIEW), 2);
    }

    #[test]
    fn views_are_tracked_independently() {
        let views = ViewVersions::new();
        views.invalidate("/");
        assert_eq!(views.version("/other"), 0);
    }
}
