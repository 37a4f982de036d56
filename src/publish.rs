// ABOUTME: Artifact publication to the blob store.
// ABOUTME: Uploads the workflow file as JSON under the requested key and tier.

use crate::deploy::{DeployError, PublishRequest};
use crate::platform::{BlobStore, PutObject};

/// Content type every artifact is stored with.
pub const CONTENT_TYPE: &str = "application/json";

/// Write the request's source file to its location.
///
/// Re-publishing a key overwrites it. Failures are returned as
/// `DeployError::Publish` without retrying.
pub async fn publish<B: BlobStore + ?Sized>(
    store: &B,
    request: &PublishRequest,
) -> Result<(), DeployError> {
    let location = request.location();

    let body = tokio::fs::read(request.source())
        .await
        .map_err(|e| DeployError::publish(location.uri(), e))?;

    tracing::info!(
        "Uploading {} ({} bytes) to {} as {}",
        request.source().display(),
        body.len(),
        location,
        request.storage_class()
    );

    store
        .put_object(PutObject {
            bucket: location.bucket(),
            key: location.key(),
            body: &body,
            content_type: CONTENT_TYPE,
            storage_class: request.storage_class(),
        })
        .await
        .map_err(|e| DeployError::publish(location.uri(), e))
}
