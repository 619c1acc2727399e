use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{sdk_error, BoxError, HealthAlertError};
use crate::model::HealthSnapshot;

/// One-second resolution.
const KEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Durable object storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), BoxError>;
}

pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: S3Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), BoxError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }
}

/// `<prefix>/<YYYY-MM-DDTHH-MM-SS>.log`. Two snapshots taken within the same
/// second map to the same key.
pub fn archive_key(prefix: &str, timestamp: &DateTime<Utc>) -> String {
    format!("{}/{}.log", prefix, timestamp.format(KEY_TIMESTAMP_FORMAT))
}

/// Writes the snapshot as indented JSON and returns the key it was stored under.
pub async fn archive_snapshot<O: ObjectStore + ?Sized>(
    store: &O,
    bucket: &str,
    prefix: &str,
    snapshot: &HealthSnapshot,
) -> Result<String, HealthAlertError> {
    let key = archive_key(prefix, &snapshot.timestamp);
    let body = serde_json::to_vec_pretty(snapshot)?;

    store
        .put_object(bucket, &key, body)
        .await
        .map_err(|source| HealthAlertError::Archive {
            bucket: bucket.to_string(),
            key: key.clone(),
            source,
        })?;

    info!("Logs stored in S3 at {}", key);

    Ok(key)
}
