use std::time::Duration;

use futures::future::BoxFuture;
use google_cloud_storage::{
    http::objects::{get::GetObjectRequest, list::ListObjectsRequest},
    sign::{SignedURLMethod, SignedURLOptions},
};

use crate::{
    adapters,
    model::storage::{StorageError, StorageObject},
};

impl adapters::ObjectAdapter for google_cloud_storage::client::Client {
    fn store_list_objects<'a>(
        &'a self,
        bucket: &'a str,
        prefix: &'a str,
    ) -> BoxFuture<'a, Result<Vec<StorageObject>, StorageError>> {
        Box::pin(async move {
            let mut objects = Vec::new();
            let mut continuation_token: Option<String> = None;

            loop {
                let req = ListObjectsRequest {
                    bucket: bucket.to_string(),
                    prefix: Some(prefix.to_string()),
                    page_token: continuation_token.clone(),
                    ..Default::default()
                };

                let lo = self.list_objects(&req).await.map_err(|err| {
                    StorageError::request(format!("failed to list_objects at: {}, {}", prefix, err))
                })?;

                if let Some(objs) = lo.items {
                    for obj in objs {
                        objects.push(StorageObject { key: obj.name });
                    }
                }

                continuation_token = lo.next_page_token;
                if continuation_token.is_none() {
                    break;
                }
            }

            Ok(objects)
        })
    }

    fn store_download_url<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        expires: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            // a signed url is issued for any key, so existence is checked first
            let req = GetObjectRequest {
                bucket: bucket.to_string(),
                object: key.to_string(),
                ..Default::default()
            };

            match self.get_object(&req).await {
                Err(google_cloud_storage::http::Error::Response(err)) if err.code == 404 => {
                    return Err(StorageError::NotFound {
                        key: key.to_string(),
                    });
                }
                Err(err) => {
                    return Err(StorageError::request(format!(
                        "failed to get_object: {}, {}",
                        key, err
                    )));
                }
                Ok(_) => {}
            }

            let opts = SignedURLOptions {
                method: SignedURLMethod::GET,
                expires,
                ..Default::default()
            };

            self.signed_url(bucket, key, None, None, opts)
                .await
                .map_err(|err| {
                    StorageError::request(format!("failed to sign url for: {}, {}", key, err))
                })
        })
    }
}
