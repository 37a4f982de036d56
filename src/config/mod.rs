// ABOUTME: Configuration types and parsing for stackshift.yml.
// ABOUTME: Handles YAML parsing, discovery, and destination merging.

mod init;
mod poll;

pub use init::{generate_template_yaml, init_config};
pub use poll::{PollConfig, PollOverrides};

use crate::error::{Error, Result};
use crate::platform::Capability;
use crate::validate::{PublishArgs, UpdateArgs};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "stackshift.yml";
pub const CONFIG_FILENAME_ALT: &str = "stackshift.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stackshift/config.yml";

pub const DEFAULT_KEY_PARAMETER: &str = "S3Key";
pub const DEFAULT_RESOURCE_PARAMETER: &str = "SMResource";
pub const DEFAULT_RESOURCE: &str = "MyStateMachine";

/// Everything a deployment can take from a file. All fields are optional;
/// missing ones must come from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub storage_class: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,

    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub key_parameter: Option<String>,

    #[serde(default)]
    pub resource_parameter: Option<String>,

    #[serde(default)]
    pub resource: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    /// Path to the `aws` executable.
    #[serde(default)]
    pub aws_cli: Option<PathBuf>,

    #[serde(default)]
    pub capabilities: Vec<Capability>,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

/// Per-environment overrides, selected with `--destination`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub storage_class: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,

    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub resource: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub capabilities: Option<Vec<Capability>>,

    #[serde(default)]
    pub poll: Option<PollOverrides>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // A file holding only comments is an empty config.
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let config: Config = if value.is_null() {
            Config::default()
        } else {
            serde_yaml::from_value(value)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Using configuration {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Load `explicit` if given, else discover in `dir`.
    ///
    /// A config file is optional: an undiscovered one yields the defaults,
    /// but an explicitly named one must exist.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::discover(dir) {
                Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
                other => other,
            },
        }
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        override_with(&mut merged.bucket, &dest.bucket);
        override_with(&mut merged.key, &dest.key);
        override_with(&mut merged.storage_class, &dest.storage_class);
        override_with(&mut merged.stack, &dest.stack);
        override_with(&mut merged.template, &dest.template);
        override_with(&mut merged.resource, &dest.resource);
        override_with(&mut merged.region, &dest.region);
        override_with(&mut merged.profile, &dest.profile);

        // Replace capabilities wholesale if specified
        if let Some(ref capabilities) = dest.capabilities {
            merged.capabilities = capabilities.clone();
        }

        if let Some(ref poll) = dest.poll {
            poll.apply(&mut merged.poll);
        }

        merged.validate()?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        self.poll.validate().map_err(Error::InvalidConfig)
    }

    /// Publish arguments as far as the file knows them.
    pub fn publish_args(&self) -> PublishArgs {
        PublishArgs {
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            source: self.source.clone(),
            storage_class: self.storage_class.clone(),
        }
    }

    /// Update arguments as far as the file knows them, with the
    /// parameter names and target resource defaulted.
    pub fn update_args(&self) -> UpdateArgs {
        UpdateArgs {
            stack: self.stack.clone(),
            template: self.template.clone(),
            key_parameter: Some(or_default(&self.key_parameter, DEFAULT_KEY_PARAMETER)),
            resource_parameter: Some(or_default(
                &self.resource_parameter,
                DEFAULT_RESOURCE_PARAMETER,
            )),
            resource: Some(or_default(&self.resource, DEFAULT_RESOURCE)),
            artifact: None,
            description: self.description.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

fn override_with(target: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}
