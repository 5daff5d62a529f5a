use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use tracing::{debug, error};

use crate::model::issue::Issue;

/// Resolved listings keyed by folder. A zero ttl disables caching.
pub struct ListingCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Vec<Issue>)>>,
}

impl ListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, folder: &str) -> Option<Vec<Issue>> {
        self.get_at(folder, Instant::now())
    }

    fn get_at(&self, folder: &str, now: Instant) -> Option<Vec<Issue>> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = match self.entries.lock() {
            Err(err) => {
                error!(error_message=%err, error_group="acquire_guard");
                return None;
            }
            Ok(guard) => guard,
        };

        match entries.get(folder) {
            Some((stored_at, issues)) if now.saturating_duration_since(*stored_at) < self.ttl => {
                debug!(folder = folder, count = issues.len(), "listing cache hit");
                Some(issues.clone())
            }
            Some(_) => {
                entries.remove(folder);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, folder: &str, issues: Vec<Issue>) {
        self.put_at(folder, issues, Instant::now());
    }

    fn put_at(&self, folder: &str, issues: Vec<Issue>, stored_at: Instant) {
        if !self.is_enabled() {
            return;
        }

        match self.entries.lock() {
            Err(err) => {
                error!(error_message=%err, error_group="acquire_guard");
            }
            Ok(mut entries) => {
                entries.insert(folder.to_string(), (stored_at, issues));
            }
        }
    }

    pub fn invalidate(&self) {
        match self.entries.lock() {
            Err(err) => {
                error!(error_message=%err, error_group="acquire_guard");
            }
            Ok(mut entries) => entries.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues() -> Vec<Issue> {
        vec![Issue::new("1986-04.pdf", "https://storage.test/a")]
    }

    #[test]
    fn test_disabled() {
        let cache = ListingCache::new(Duration::ZERO);
        cache.put("rundschau", issues());

        assert!(!cache.is_enabled());
        assert_eq!(cache.get("rundschau"), None);
    }

    #[test]
    fn test_hit_and_invalidate() {
        let cache = ListingCache::new(Duration::from_secs(60));
        cache.put("rundschau", issues());

        assert_eq!(cache.get("rundschau"), Some(issues()));
        assert_eq!(cache.get("rundschauPreview"), None);

        cache.invalidate();
        assert_eq!(cache.get("rundschau"), None);
    }

    #[test]
    fn test_expired() {
        let cache = ListingCache::new(Duration::from_secs(60));
        let stored_at = Instant::now();
        cache.put_at("rundschau", issues(), stored_at);

        let cases = vec![
            (Duration::ZERO, Some(issues())),
            (Duration::from_secs(59), Some(issues())),
            (Duration::from_secs(60), None),
            // expired entries are dropped, not revived
            (Duration::from_secs(1), None),
        ];

        for (age, expected) in cases {
            assert_eq!(cache.get_at("rundschau", stored_at + age), expected, "failed case: {:?}", age);
        }
    }
}
