// ABOUTME: Unvalidated argument bundles as collected from the CLI and config.
// ABOUTME: Every field is optional until the validators have seen it.

use chrono::{SecondsFormat, Utc};

use crate::platform::Capability;
use crate::types::ObjectLocation;

/// Raw publish parameters.
#[derive(Debug, Clone, Default)]
pub struct PublishArgs {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub source: Option<String>,
    pub storage_class: Option<String>,
}

/// Raw update parameters.
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    pub stack: Option<String>,
    pub template: Option<String>,
    pub key_parameter: Option<String>,
    pub resource_parameter: Option<String>,
    pub resource: Option<String>,
    /// Only read by a standalone update; a deployment uses its publish location.
    pub artifact: Option<String>,
    /// `None` gets a generated description.
    pub description: Option<String>,
    /// Empty means the default set.
    pub capabilities: Vec<Capability>,
}

#[derive(Debug, Clone, Default)]
pub struct DeploymentArgs {
    pub publish: PublishArgs,
    pub update: UpdateArgs,
}

/// Description used when none is given: artifact, operator and time.
pub fn default_description(artifact: &ObjectLocation) -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());
    let host = gethostname::gethostname().to_string_lossy().into_owned();

    format!(
        "stackshift: {} by {}@{} at {}",
        artifact.uri(),
        user,
        host,
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
