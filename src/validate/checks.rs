// ABOUTME: Post-checks applied to a parameter once it is known to be present.
// ABOUTME: Local file checks plus remote lookups against the blob store and stacks.

use async_trait::async_trait;
use std::path::Path;

use crate::deploy::{DeployError, Stage};
use crate::platform::{BlobStore, StackPlatform};
use crate::precondition;
use crate::types::{ObjectLocation, StorageClass};

/// A single check on a named parameter value.
#[async_trait]
pub trait Check: Send + Sync {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError>;
}

/// The value is a bare name: no line breaks or other control characters.
pub struct SingleLine;

#[async_trait]
impl Check for SingleLine {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError> {
        if value.chars().any(char::is_control) {
            return Err(DeployError::validation(
                parameter,
                "must be a single-line text value",
            ));
        }
        Ok(())
    }
}

/// The value names an existing regular file.
pub struct FileExists;

#[async_trait]
impl Check for FileExists {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError> {
        match tokio::fs::metadata(value).await {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(DeployError::validation(
                parameter,
                format!("'{value}' is not a regular file"),
            )),
            Err(_) => Err(DeployError::validation(
                parameter,
                format!("file '{value}' does not exist"),
            )),
        }
    }
}

/// The value is one of the accepted storage tiers.
pub struct StorageClassCheck;

#[async_trait]
impl Check for StorageClassCheck {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError> {
        value
            .parse::<StorageClass>()
            .map(|_| ())
            .map_err(|e| DeployError::validation(parameter, e.to_string()))
    }
}

/// The value is an `s3://bucket/key` URI.
pub struct ArtifactUri;

#[async_trait]
impl Check for ArtifactUri {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError> {
        value
            .parse::<ObjectLocation>()
            .map(|_| ())
            .map_err(|e| DeployError::validation(parameter, e.to_string()))
    }
}

/// The value names a bucket visible to the caller.
pub struct BucketExists<'a, B: ?Sized>(pub &'a B);

#[async_trait]
impl<B: BlobStore + ?Sized> Check for BucketExists<'_, B> {
    async fn check(&self, parameter: &str, value: &str) -> Result<(), DeployError> {
        let buckets = self
            .0
            .list_buckets()
            .await
            .map_err(DeployError::platform(Stage::Validation))?;

        if buckets.iter().any(|b| b == value) {
            Ok(())
        } else {
            Err(DeployError::validation(
                parameter,
                format!("bucket '{value}' does not exist or is not accessible"),
            ))
        }
    }
}

/// The value names a stack that is ready for an update.
pub struct StackUpdatable<'a, P: ?Sized>(pub &'a P);

#[async_trait]
impl<P: StackPlatform + ?Sized> Check for StackUpdatable<'_, P> {
    async fn check(&self, _parameter: &str, value: &str) -> Result<(), DeployError> {
        precondition::check_stack_updatable(self.0, value)
            .await
            .map(|_| ())
    }
}

/// The value names a template declaring both required parameters.
pub struct TemplateDeclares<'a> {
    pub required: [&'a str; 2],
}

#[async_trait]
impl Check for TemplateDeclares<'_> {
    async fn check(&self, _parameter: &str, value: &str) -> Result<(), DeployError> {
        precondition::check_template_parameters(Path::new(value), &self.required)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::InMemoryPlatform;

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = FileExists
            .check("source", "/definitely/not/here.json")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "source: file '/definitely/not/here.json' does not exist"
        );
    }

    #[tokio::test]
    async fn directories_are_not_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        assert!(FileExists.check("template", &path).await.is_err());
    }

    #[tokio::test]
    async fn bucket_must_be_listed() {
        let store = InMemoryPlatform::new().with_bucket("artifacts");
        assert!(BucketExists(&store).check("bucket", "artifacts").await.is_ok());

        let err = BucketExists(&store)
            .check("bucket", "elsewhere")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("bucket: bucket 'elsewhere'"));
    }

    #[tokio::test]
    async fn stack_must_be_updatable() {
        let platform = InMemoryPlatform::new().with_stack("workflows");
        assert!(StackUpdatable(&platform).check("stack", "workflows").await.is_ok());

        let err = StackUpdatable(&platform)
            .check("stack", "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Precondition(_)));
    }

    #[tokio::test]
    async fn artifact_uri_needs_scheme() {
        assert!(ArtifactUri.check("artifact", "s3://b/k.json").await.is_ok());
        assert!(ArtifactUri.check("artifact", "b/k.json").await.is_err());
    }
}
