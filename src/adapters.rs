use std::time::Duration;

use futures::future::BoxFuture;

use crate::model::storage::{StorageError, StorageObject};

pub mod gcs;
#[cfg(test)]
pub mod mock;
pub mod s3;

/// The two storage operations the site consumes.
pub trait ObjectAdapter: Send + Sync {
    /// Lists every object whose key starts with `prefix`, across all pages.
    fn store_list_objects<'a>(
        &'a self,
        bucket: &'a str,
        prefix: &'a str,
    ) -> BoxFuture<'a, Result<Vec<StorageObject>, StorageError>>;

    /// Resolves `key` to a download link valid for `expires`.
    /// Fails with [`StorageError::NotFound`] when the object does not exist.
    fn store_download_url<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        expires: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>>;
}
