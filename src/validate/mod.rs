// ABOUTME: Parameter validation that runs before any remote mutation.
// ABOUTME: Turns loosely-specified arguments into strongly-typed requests.

mod args;
mod checks;

pub use args::{DeploymentArgs, PublishArgs, UpdateArgs, default_description};
pub use checks::{
    ArtifactUri, BucketExists, Check, FileExists, SingleLine, StackUpdatable, StorageClassCheck,
    TemplateDeclares,
};

use std::path::PathBuf;

use crate::deploy::{DeployError, DeploymentRequest, PublishRequest, UpdateRequest};
use crate::platform::{BlobStore, Capability, StackPlatform};
use crate::types::{ObjectLocation, StorageClass};

/// Validate one named value and run its post-checks in order.
///
/// Returns the value on success. Fails on the first problem with a
/// `DeployError` naming `parameter`: absent, blank, or rejected by a check.
pub async fn check_parameter(
    parameter: &str,
    value: Option<&str>,
    checks: &[&dyn Check],
) -> Result<String, DeployError> {
    let value = value.ok_or_else(|| DeployError::validation(parameter, "must be provided"))?;

    if value.trim().is_empty() {
        return Err(DeployError::validation(parameter, "must not be empty"));
    }

    for check in checks {
        check.check(parameter, value).await?;
    }

    Ok(value.to_string())
}

/// Validate the publish half: bucket, key, source file, storage class.
pub async fn publish_request<B: BlobStore + ?Sized>(
    args: &PublishArgs,
    store: &B,
) -> Result<PublishRequest, DeployError> {
    let bucket = check_parameter(
        "bucket",
        args.bucket.as_deref(),
        &[&SingleLine, &BucketExists(store)],
    ).await?;
    let key = check_parameter("key", args.key.as_deref(), &[&SingleLine]).await?;
    let source = check_parameter("source", args.source.as_deref(), &[&FileExists]).await?;
    let storage_class = check_parameter(
        "storage_class",
        Some(args.storage_class.as_deref().unwrap_or(StorageClass::default().as_str())),
        &[&StorageClassCheck],
    )
    .await?;

    let location =
        ObjectLocation::new(&bucket, &key).map_err(|e| DeployError::validation("key", e.to_string()))?;
    let storage_class = storage_class
        .parse::<StorageClass>()
        .map_err(|e| DeployError::validation("storage_class", e.to_string()))?;

    Ok(PublishRequest {
        location,
        source: PathBuf::from(source),
        storage_class,
    })
}

/// Validate the update half, including stack and template preconditions.
///
/// The artifact URI is taken from `args.artifact`.
pub async fn update_request<P: StackPlatform + ?Sized>(
    args: &UpdateArgs,
    platform: &P,
) -> Result<UpdateRequest, DeployError> {
    let artifact = check_parameter("artifact", args.artifact.as_deref(), &[&ArtifactUri]).await?;
    let artifact = artifact
        .parse::<ObjectLocation>()
        .map_err(|e| DeployError::validation("artifact", e.to_string()))?;
    update_request_for(args, &artifact, platform).await
}

async fn update_request_for<P: StackPlatform + ?Sized>(
    args: &UpdateArgs,
    artifact: &ObjectLocation,
    platform: &P,
) -> Result<UpdateRequest, DeployError> {
    let key_parameter =
        check_parameter("key_parameter", args.key_parameter.as_deref(), &[&SingleLine]).await?;
    let resource_parameter = check_parameter(
        "resource_parameter",
        args.resource_parameter.as_deref(),
        &[&SingleLine],
    )
    .await?;
    let resource = check_parameter("resource", args.resource.as_deref(), &[&SingleLine]).await?;

    let stack_name = check_parameter(
        "stack",
        args.stack.as_deref(),
        &[&SingleLine, &StackUpdatable(platform)],
    )
    .await?;

    let declares = TemplateDeclares {
        required: [key_parameter.as_str(), resource_parameter.as_str()],
    };
    let template =
        check_parameter("template", args.template.as_deref(), &[&FileExists, &declares]).await?;

    let generated;
    let description = match args.description.as_deref() {
        Some(description) => description,
        None => {
            generated = default_description(artifact);
            &generated
        }
    };
    let description = check_parameter("description", Some(description), &[]).await?;

    let capabilities = if args.capabilities.is_empty() {
        Capability::defaults()
    } else {
        args.capabilities.clone()
    };

    Ok(UpdateRequest {
        stack_name,
        template: PathBuf::from(template),
        key_parameter,
        resource_parameter,
        resource,
        artifact: artifact.clone(),
        description,
        capabilities,
    })
}

/// Validate a full deployment. Publish parameters are checked first.
///
/// `args.update.artifact` is ignored; the artifact is the publish location.
pub async fn deployment_request<B, P>(
    args: &DeploymentArgs,
    store: &B,
    platform: &P,
) -> Result<DeploymentRequest, DeployError>
where
    B: BlobStore + ?Sized,
    P: StackPlatform + ?Sized,
{
    let publish = publish_request(&args.publish, store).await?;
    let update = update_request_for(&args.update, publish.location(), platform).await?;
    Ok(DeploymentRequest { publish, update })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_value_names_the_parameter() {
        let err = check_parameter("bucket", None, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "bucket: must be provided");
    }

    #[tokio::test]
    async fn blank_values_are_rejected() {
        let err = check_parameter("key", Some("   "), &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "key: must not be empty");
    }

    #[tokio::test]
    async fn line_breaks_are_only_rejected_for_names() {
        let err = check_parameter("key", Some("a\nb"), &[&SingleLine])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "key: must be a single-line text value");

        let value = check_parameter("description", Some("Fix order flow\n\nReviewed-by: ops"), &[])
            .await
            .unwrap();
        assert_eq!(value, "Fix order flow\n\nReviewed-by: ops");
    }

    #[tokio::test]
    async fn checks_run_in_order_and_stop_at_first_failure() {
        let err = check_parameter("storage_class", Some("GLACIER"), &[&StorageClassCheck, &FileExists])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[tokio::test]
    async fn valid_value_is_returned() {
        let value = check_parameter("storage_class", Some("ONEZONE_IA"), &[&StorageClassCheck])
            .await
            .unwrap();
        assert_eq!(value, "ONEZONE_IA");
    }
}
