// ABOUTME: Test support utilities.
// ABOUTME: Provides tracing setup, on-disk fixtures and scripted platforms.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use stackshift::config::PollConfig;
use stackshift::platform::memory::{InMemoryPlatform, description};
use stackshift::platform::{ChangeAction, ChangeSetStatus, ExecutionStatus};
use stackshift::validate::{DeploymentArgs, PublishArgs, UpdateArgs};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("stackshift=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const BUCKET: &str = "artifacts";
pub const KEY: &str = "workflows/orders.json";
pub const STACK: &str = "orders-workflow";
pub const RESOURCE: &str = "MyStateMachine";

pub const WORKFLOW: &str = r#"{"StartAt": "Done", "States": {"Done": {"Type": "Succeed"}}}"#;

pub const TEMPLATE: &str = r#"{
  "Transform": ["InjectWorkflow"],
  "Parameters": {
    "S3Key": {"Type": "String"},
    "SMResource": {"Type": "String"},
    "RoleName": {"Type": "String", "Default": "orders-workflow-role"}
  },
  "Resources": {
    "MyStateMachine": {"Type": "AWS::StepFunctions::StateMachine"}
  }
}"#;

/// A workflow file and a template in a scratch directory.
pub struct Fixture {
    pub dir: TempDir,
    pub workflow: PathBuf,
    pub template: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_template(TEMPLATE)
    }

    pub fn with_template(template: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let workflow = dir.path().join("workflow.json");
        let template_path = dir.path().join("template.json");
        std::fs::write(&workflow, WORKFLOW).unwrap();
        std::fs::write(&template_path, template).unwrap();
        Self {
            dir,
            workflow,
            template: template_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn publish_args(&self) -> PublishArgs {
        PublishArgs {
            bucket: Some(BUCKET.to_string()),
            key: Some(KEY.to_string()),
            source: Some(self.workflow.to_string_lossy().into_owned()),
            storage_class: None,
        }
    }

    pub fn update_args(&self) -> UpdateArgs {
        UpdateArgs {
            stack: Some(STACK.to_string()),
            template: Some(self.template.to_string_lossy().into_owned()),
            key_parameter: Some("S3Key".to_string()),
            resource_parameter: Some("SMResource".to_string()),
            resource: Some(RESOURCE.to_string()),
            artifact: Some(format!("s3://{BUCKET}/{KEY}")),
            description: Some("commit 4f2a9c1".to_string()),
            capabilities: Vec::new(),
        }
    }

    pub fn deployment_args(&self) -> DeploymentArgs {
        DeploymentArgs {
            publish: self.publish_args(),
            update: self.update_args(),
        }
    }
}

/// Short intervals so unpaused tests stay quick.
pub fn fast_poll() -> PollConfig {
    PollConfig {
        initial_interval: Duration::from_millis(5),
        max_wait: Duration::from_secs(5),
    }
}

/// A platform where everything goes to plan: the bucket and stack exist,
/// the change set targets the resource and settles as available.
pub fn healthy_platform() -> InMemoryPlatform {
    InMemoryPlatform::new()
        .with_bucket(BUCKET)
        .with_stack(STACK)
        .before_execute(vec![
            description(ChangeSetStatus::CreatePending, ExecutionStatus::Unavailable, &[]),
            description(ChangeSetStatus::CreateInProgress, ExecutionStatus::Unavailable, &[]),
            description(
                ChangeSetStatus::CreateComplete,
                ExecutionStatus::Available,
                &[(RESOURCE, ChangeAction::Modify)],
            ),
        ])
        .after_execute(vec![description(
            ChangeSetStatus::CreateComplete,
            ExecutionStatus::Available,
            &[(RESOURCE, ChangeAction::Modify)],
        )])
}
