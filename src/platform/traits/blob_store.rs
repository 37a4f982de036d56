// ABOUTME: Blob store operations used to publish artifacts.
// ABOUTME: Bucket listing for existence checks and single-object writes.

use super::shared_types::PutObject;
use crate::platform::PlatformError;
use async_trait::async_trait;

/// Key-addressed object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Names of every bucket visible to the caller.
    async fn list_buckets(&self) -> Result<Vec<String>, PlatformError>;

    /// Write one object, replacing whatever is stored at the key.
    async fn put_object(&self, object: PutObject<'_>) -> Result<(), PlatformError>;
}
