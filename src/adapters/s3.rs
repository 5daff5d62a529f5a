use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use futures::future::BoxFuture;

use crate::{
    adapters,
    model::storage::{StorageError, StorageObject},
};

impl adapters::ObjectAdapter for aws_sdk_s3::Client {
    fn store_list_objects<'a>(
        &'a self,
        bucket: &'a str,
        prefix: &'a str,
    ) -> BoxFuture<'a, Result<Vec<StorageObject>, StorageError>> {
        Box::pin(async move {
            let mut objects = Vec::new();
            let mut continuation_token: Option<String> = None;

            loop {
                let mut req = self.list_objects_v2().bucket(bucket).prefix(prefix);

                if let Some(tok) = continuation_token {
                    req = req.continuation_token(tok);
                }

                let lo = req.send().await.map_err(|err| {
                    StorageError::request(format!("failed to list_objects at: {}, {}", prefix, err))
                })?;

                for o in lo.contents() {
                    if let Some(key) = o.key() {
                        objects.push(StorageObject {
                            key: key.to_string(),
                        });
                    }
                }

                continuation_token = lo.next_continuation_token().map(|tok| tok.to_string());
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
            // presigning never fails for missing keys, so existence is checked first
            if let Err(err) = self.head_object().bucket(bucket).key(key).send().await {
                if let Some(svc_err) = err.as_service_error() {
                    if svc_err.is_not_found() {
                        return Err(StorageError::NotFound {
                            key: key.to_string(),
                        });
                    }
                }

                return Err(StorageError::request(format!(
                    "failed to head_object: {}, {}",
                    key, err
                )));
            }

            let presigning = PresigningConfig::expires_in(expires).map_err(|err| {
                StorageError::request(format!("invalid url expiry for: {}, {}", key, err))
            })?;

            let req = self
                .get_object()
                .bucket(bucket)
                .key(key)
                .presigned(presigning)
                .await
                .map_err(|err| {
                    StorageError::request(format!("failed to presign get_object: {}, {}", key, err))
                })?;

            Ok(req.uri().to_string())
        })
    }
}
