// ABOUTME: Blob store and stack platform backed by the `aws` command-line client.
// ABOUTME: Each trait call becomes one client invocation with JSON output.

mod responses;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::error::{DecodeSnafu, PlatformError, SpawnSnafu, StagingSnafu};
use super::traits::{
    BlobStore, ChangeSetDescription, CreateChangeSetInput, PutObject, StackPage, StackPlatform,
    StackStatus,
};
use crate::types::ChangeSetId;
use responses::{
    CreateChangeSetResponse, DescribeChangeSetResponse, ListBucketsResponse, ListStacksResponse,
};

pub const DEFAULT_PROGRAM: &str = "aws";

/// Talks to S3 and CloudFormation through the `aws` CLI.
///
/// Credentials, retries and request signing are left to the client, so
/// whatever profile works for `aws` on this machine works here.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
    region: Option<String>,
    profile: Option<String>,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            region: None,
            profile: None,
        }
    }

    /// Use a different client binary.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    fn command(&self, service: &str, operation: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(service).arg(operation).arg("--output").arg("json");
        if let Some(ref region) = self.region {
            cmd.arg("--region").arg(region);
        }
        if let Some(ref profile) = self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Run a prepared invocation, returning stdout on success.
    async fn run(&self, mut cmd: Command, operation: &str) -> Result<Vec<u8>, PlatformError> {
        tracing::debug!("Invoking {} {}", self.program.display(), operation);

        let output = cmd.output().await.context(SpawnSnafu {
            program: self.program.display().to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                trimmed => trimmed.to_string(),
            };
            tracing::debug!("{} failed: {}", operation, message);
            return Err(PlatformError::remote(operation, message));
        }

        Ok(output.stdout)
    }

    async fn run_json<T: DeserializeOwned>(
        &self,
        cmd: Command,
        operation: &str,
    ) -> Result<T, PlatformError> {
        let stdout = self.run(cmd, operation).await?;
        serde_json::from_slice(&stdout).context(DecodeSnafu { operation })
    }
}

/// Copy an object body into a temporary file the client can upload from.
fn stage_body(body: &[u8]) -> Result<tempfile::NamedTempFile, PlatformError> {
    let mut staged = tempfile::NamedTempFile::new().context(StagingSnafu {
        operation: "put-object",
    })?;
    staged.write_all(body).context(StagingSnafu {
        operation: "put-object",
    })?;
    staged.flush().context(StagingSnafu {
        operation: "put-object",
    })?;
    Ok(staged)
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[async_trait]
impl BlobStore for AwsCli {
    async fn list_buckets(&self) -> Result<Vec<String>, PlatformError> {
        let cmd = self.command("s3api", "list-buckets");
        let response: ListBucketsResponse = self.run_json(cmd, "list-buckets").await?;
        Ok(response.buckets.into_iter().map(|b| b.name).collect())
    }

    async fn put_object(&self, object: PutObject<'_>) -> Result<(), PlatformError> {
        let staged = stage_body(object.body)?;

        let mut cmd = self.command("s3api", "put-object");
        cmd.arg("--bucket")
            .arg(object.bucket)
            .arg("--key")
            .arg(object.key)
            .arg("--body")
            .arg(path_arg(staged.path()))
            .arg("--content-type")
            .arg(object.content_type)
            .arg("--storage-class")
            .arg(object.storage_class.as_str());

        // The staged file must outlive the upload.
        self.run(cmd, "put-object").await?;
        drop(staged);
        Ok(())
    }
}

#[async_trait]
impl StackPlatform for AwsCli {
    async fn list_stacks(
        &self,
        status_filter: &[StackStatus],
        next_token: Option<&str>,
    ) -> Result<StackPage, PlatformError> {
        let mut cmd = self.command("cloudformation", "list-stacks");
        if !status_filter.is_empty() {
            cmd.arg("--stack-status-filter");
            for status in status_filter {
                cmd.arg(status.as_str());
            }
        }
        if let Some(token) = next_token {
            cmd.arg("--starting-token").arg(token);
        }

        let response: ListStacksResponse = self.run_json(cmd, "list-stacks").await?;
        Ok(response.into_page())
    }

    async fn create_change_set(
        &self,
        input: &CreateChangeSetInput,
    ) -> Result<ChangeSetId, PlatformError> {
        let parameters = serde_json::to_string(&input.parameters).context(DecodeSnafu {
            operation: "create-change-set",
        })?;

        let mut cmd = self.command("cloudformation", "create-change-set");
        cmd.arg("--stack-name")
            .arg(&input.stack_name)
            .arg("--template-body")
            .arg(&input.template_body)
            .arg("--parameters")
            .arg(parameters)
            .arg("--description")
            .arg(&input.description)
            .arg("--change-set-name")
            .arg(input.change_set_name.as_str())
            .arg("--change-set-type")
            .arg("UPDATE");
        if !input.capabilities.is_empty() {
            cmd.arg("--capabilities");
            for capability in &input.capabilities {
                cmd.arg(capability.as_str());
            }
        }

        let response: CreateChangeSetResponse =
            self.run_json(cmd, "create-change-set").await?;
        response.into_id()
    }

    async fn describe_change_set(
        &self,
        id: &ChangeSetId,
    ) -> Result<ChangeSetDescription, PlatformError> {
        let mut pages = Vec::new();
        let mut next_token: Option<String> = None;

        // Changes are paginated; the scope gate needs all of them.
        loop {
            let mut cmd = self.command("cloudformation", "describe-change-set");
            cmd.arg("--change-set-name").arg(id.as_str());
            if let Some(ref token) = next_token {
                cmd.arg("--next-token").arg(token);
            }

            let page: DescribeChangeSetResponse =
                self.run_json(cmd, "describe-change-set").await?;
            next_token = page.next_token.clone();
            pages.push(page);

            if next_token.is_none() {
                break;
            }
        }

        DescribeChangeSetResponse::merge(id, pages)
    }

    async fn execute_change_set(&self, id: &ChangeSetId) -> Result<(), PlatformError> {
        let mut cmd = self.command("cloudformation", "execute-change-set");
        cmd.arg("--change-set-name").arg(id.as_str());
        self.run(cmd, "execute-change-set").await?;
        Ok(())
    }
}
