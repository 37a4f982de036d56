// ABOUTME: Validated, strongly-typed deployment requests.
// ABOUTME: Only the validators in crate::validate construct these.

use std::path::{Path, PathBuf};

use crate::platform::Capability;
use crate::types::{ObjectLocation, StorageClass};

/// Where and how to publish the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub(crate) location: ObjectLocation,
    pub(crate) source: PathBuf,
    pub(crate) storage_class: StorageClass,
}

impl PublishRequest {
    pub fn location(&self) -> &ObjectLocation {
        &self.location
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn storage_class(&self) -> StorageClass {
        self.storage_class
    }
}

/// Which stack to update, through which template parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub(crate) stack_name: String,
    pub(crate) template: PathBuf,
    pub(crate) key_parameter: String,
    pub(crate) resource_parameter: String,
    pub(crate) resource: String,
    pub(crate) artifact: ObjectLocation,
    pub(crate) description: String,
    pub(crate) capabilities: Vec<Capability>,
}

impl UpdateRequest {
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Template parameter that receives the artifact URI.
    pub fn key_parameter(&self) -> &str {
        &self.key_parameter
    }

    /// Template parameter that receives the target's logical id.
    pub fn resource_parameter(&self) -> &str {
        &self.resource_parameter
    }

    /// Logical id of the resource the change set must modify.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn artifact(&self) -> &ObjectLocation {
        &self.artifact
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Both parameters the template must declare.
    pub fn required_parameters(&self) -> [&str; 2] {
        [&self.key_parameter, &self.resource_parameter]
    }
}

/// Publish followed by update, sharing one artifact location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub(crate) publish: PublishRequest,
    pub(crate) update: UpdateRequest,
}

impl DeploymentRequest {
    pub fn publish(&self) -> &PublishRequest {
        &self.publish
    }

    pub fn update(&self) -> &UpdateRequest {
        &self.update
    }
}
