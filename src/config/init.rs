// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates a commented stackshift.yml template.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ObjectLocation;

use super::{CONFIG_FILENAME, DEFAULT_KEY_PARAMETER, DEFAULT_RESOURCE, DEFAULT_RESOURCE_PARAMETER};

pub fn init_config(
    dir: &Path,
    bucket: Option<&str>,
    stack: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let bucket = bucket.unwrap_or("my-artifact-bucket");
    let stack = stack.unwrap_or("my-workflow-stack");

    // Catch names that could never form an object location.
    ObjectLocation::new(bucket, "workflow.json")
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;
    if stack.trim().is_empty() {
        return Err(Error::InvalidConfig("stack name must not be empty".to_string()));
    }

    std::fs::write(&config_path, generate_template_yaml(bucket, stack))?;

    Ok(())
}

pub fn generate_template_yaml(bucket: &str, stack: &str) -> String {
    format!(
        r#"# Where the workflow definition is published
bucket: {bucket}
key: workflows/workflow.json
source: workflow.json
# storage_class: STANDARD   # or STANDARD_IA, ONEZONE_IA

# The stack that embeds the workflow
stack: {stack}
template: template.yml
key_parameter: {DEFAULT_KEY_PARAMETER}
resource_parameter: {DEFAULT_RESOURCE_PARAMETER}
resource: {DEFAULT_RESOURCE}

# region: eu-west-1
# profile: default
# capabilities: [CAPABILITY_IAM, CAPABILITY_NAMED_IAM]

# poll:
#   initial_interval: 2s
#   max_wait: 30m

# destinations:
#   staging:
#     stack: my-workflow-stack-staging
"#
    )
}
