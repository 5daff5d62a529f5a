use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::future::{join_all, try_join_all};
use tracing::{error, info, span, warn, Instrument, Level};

use crate::{
    adapters::ObjectAdapter,
    cache::ListingCache,
    config::SiteConfig,
    model::{
        issue::{Issue, Preview},
        storage::StorageError,
    },
    util::object,
};

/// Where issues and their thumbnails live, and how to reach them.
pub struct IssueSource {
    pub client: Arc<dyn ObjectAdapter>,
    pub bucket: String,
    pub issue_folder: String,
    pub preview_folder: String,
    pub url_expiry: Duration,
    pub cache: ListingCache,
}

impl IssueSource {
    pub fn new(client: Arc<dyn ObjectAdapter>, config: &SiteConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            issue_folder: config.issue_folder.clone(),
            preview_folder: config.preview_folder.clone(),
            url_expiry: config.url_expiry,
            cache: ListingCache::new(config.listing_cache),
        }
    }

    /// Lists the issue folder and resolves every object to a download url.
    ///
    /// Resolutions run concurrently. Any single failure fails the whole
    /// listing; no partial list is ever returned.
    pub async fn list(&self) -> Result<Vec<Issue>, StorageError> {
        let span = span!(Level::INFO, "list_issues", context = "list_issues");

        async {
            info!(bucket = %self.bucket, folder = %self.issue_folder, "called");

            if let Some(issues) = self.cache.get(&self.issue_folder) {
                return Ok(issues);
            }

            let prefix = object::folder_prefix(&self.issue_folder);
            let objects = self
                .client
                .store_list_objects(&self.bucket, &prefix)
                .await
                .map_err(|err| {
                    error!(error_message=%err, error_group="list_objects");
                    err
                })?;

            let names: Vec<&str> = objects
                .iter()
                .filter_map(|obj| object::child_name(&prefix, &obj.key))
                .collect();

            let issues = try_join_all(names.into_iter().map(|name| async move {
                let key = object::object_key(&self.issue_folder, name);
                let url = self
                    .client
                    .store_download_url(&self.bucket, &key, self.url_expiry)
                    .await?;

                Ok::<_, StorageError>(Issue::new(name, url))
            }))
            .await
            .map_err(|err| {
                error!(error_message=%err, error_group="download_url");
                err
            })?;

            info!(count = issues.len(), "listed");
            self.cache.put(&self.issue_folder, issues.clone());

            Ok::<Vec<Issue>, StorageError>(issues)
        }
        .instrument(span)
        .await
    }

    /// Resolves the thumbnail that belongs to issue `name`.
    pub async fn preview_url(&self, name: &str) -> Result<String, StorageError> {
        let key = object::object_key(&self.preview_folder, &object::thumbnail_name(name));
        self.client
            .store_download_url(&self.bucket, &key, self.url_expiry)
            .await
    }

    /// Like [`IssueSource::preview_url`] but never fails: a missing or
    /// unreachable thumbnail downgrades to [`Preview::Unavailable`].
    pub async fn preview(&self, name: &str) -> Preview {
        match self.preview_url(name).await {
            Ok(url) => Preview::Ready(url),
            Err(err) if err.is_not_found() => {
                info!(issue = name, "no thumbnail");
                Preview::Unavailable
            }
            Err(err) => {
                warn!(issue = name, error_message=%err, error_group="preview_url");
                Preview::Unavailable
            }
        }
    }

    pub fn invalidate(&self) {
        info!(folder = %self.issue_folder, "listing invalidated");
        self.cache.invalidate();
    }
}

/// Thumbnail state of one page, keyed by issue name.
#[derive(Debug, Default)]
pub struct PreviewBoard {
    enabled: bool,
    states: HashMap<String, Preview>,
}

impl PreviewBoard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            states: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switching either way drops every known state; nothing stale survives
    /// a toggle.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.states.clear();
    }

    /// Issues one resolution per item, concurrently. Does nothing when disabled.
    pub async fn load(&mut self, source: &IssueSource, issues: &[Issue]) {
        if !self.enabled {
            return;
        }

        self.states = issues
            .iter()
            .map(|issue| (issue.name.clone(), Preview::Loading))
            .collect();

        let previews = join_all(issues.iter().map(|issue| source.preview(&issue.name))).await;

        for (issue, preview) in issues.iter().zip(previews) {
            self.states.insert(issue.name.clone(), preview);
        }
    }

    /// `None` when thumbnails are switched off.
    pub fn state(&self, name: &str) -> Option<Preview> {
        if !self.enabled {
            return None;
        }

        Some(self.states.get(name).cloned().unwrap_or(Preview::Loading))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}
