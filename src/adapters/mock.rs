use std::{collections::HashSet, sync::Mutex, time::Duration};

use futures::future::{self, BoxFuture};

use crate::{
    adapters,
    model::storage::{StorageError, StorageObject},
};

/// In-memory bucket. Resolved urls are deterministic so tests can assert on them.
#[derive(Default)]
pub struct MockClient {
    pub keys: Vec<String>,
    pub fail_listing: bool,
    pub failing_keys: HashSet<String>,
    pub resolved: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn with_keys(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn url_for(bucket: &str, key: &str) -> String {
        format!("https://storage.test/{}/{}", bucket, key)
    }

    pub fn resolved_keys(&self) -> Vec<String> {
        self.resolved
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl adapters::ObjectAdapter for MockClient {
    fn store_list_objects<'a>(
        &'a self,
        _bucket: &'a str,
        prefix: &'a str,
    ) -> BoxFuture<'a, Result<Vec<StorageObject>, StorageError>> {
        if self.fail_listing {
            return Box::pin(future::ready(Err(StorageError::request(format!(
                "failed to list_objects at: {}, permission denied",
                prefix
            )))));
        }

        let objects = self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .map(|key| StorageObject { key: key.clone() })
            .collect();

        Box::pin(future::ready(Ok(objects)))
    }

    fn store_download_url<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        _expires: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        if let Ok(mut resolved) = self.resolved.lock() {
            resolved.push(key.to_string());
        }

        let res = if self.failing_keys.contains(key) {
            Err(StorageError::request(format!("failed to get_object: {}, timeout", key)))
        } else if self.keys.iter().any(|k| k == key) {
            Ok(Self::url_for(bucket, key))
        } else {
            Err(StorageError::NotFound {
                key: key.to_string(),
            })
        };

        Box::pin(future::ready(res))
    }
}
