// ABOUTME: End-to-end deployment: validate, publish, then update through a change set.
// ABOUTME: The single entry point the CLI commands call into.

use serde::Serialize;

use crate::config::PollConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::platform::{BlobStore, ChangeAction, ChangeSetDescription, StackPlatform};
use crate::publish;
use crate::validate::{self, DeploymentArgs};

use super::ChangeSet;
use super::error::DeployError;
use super::request::{PublishRequest, UpdateRequest};
use super::state::Pending;
use super::transitions::clip_description;

/// Summary of a completed stack update.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub stack_name: String,
    pub change_set_name: String,
    pub artifact: String,
    #[serde(flatten)]
    pub description: ChangeSetDescription,
}

/// Validate every input, publish the artifact, and apply the update.
///
/// Every check, including the stack and template preconditions, runs
/// before the artifact is written. Any failure aborts the rest; a change
/// set that was created but never executed is left behind untouched.
pub async fn deploy<B, P>(
    args: &DeploymentArgs,
    store: &B,
    platform: &P,
    poll: &PollConfig,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeploymentReport, DeployError>
where
    B: BlobStore + ?Sized,
    P: StackPlatform + ?Sized,
{
    output.progress("Validating parameters");
    let request = validate::deployment_request(args, store, platform).await?;

    publish_artifact(request.publish(), store, output).await?;
    update_stack(request.update(), platform, poll, output, diag).await
}

/// Write the artifact to the blob store.
pub async fn publish_artifact<B: BlobStore + ?Sized>(
    request: &PublishRequest,
    store: &B,
    output: &Output,
) -> Result<(), DeployError> {
    output.progress(&format!("Saving workflow to {}", request.location()));
    publish::publish(store, request).await
}

/// Run the change-set lifecycle for an already-published artifact.
pub async fn update_stack<P: StackPlatform + ?Sized>(
    request: &UpdateRequest,
    platform: &P,
    poll: &PollConfig,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeploymentReport, DeployError> {
    let template_body = tokio::fs::read_to_string(request.template())
        .await
        .map_err(|e| {
            DeployError::Precondition(format!(
                "template '{}' could not be read: {}",
                request.template().display(),
                e
            ))
        })?;

    if clip_description(request.description()).1 {
        diag.warn(Warning::description_truncated(format!(
            "change set description truncated to {} characters",
            super::MAX_DESCRIPTION_LEN
        )));
    }

    output.progress(&format!("Creating change set for stack {}", request.stack_name()));
    let change_set = ChangeSet::<Pending>::create(platform, request, template_body).await?;

    output.progress("Waiting on change set creation");
    let change_set = change_set.await_created(platform, poll).await?;

    output.progress("Validating change set");
    let change_set = change_set.validate_target(request.resource())?;
    note_collateral_changes(change_set.description(), request.resource(), diag);
    let validated_changes = change_set.description().changes.clone();

    output.progress("Applying change set");
    let change_set = change_set.execute(platform).await?;

    output.progress("Waiting on change set execution");
    let change_set = change_set.await_executed(platform, poll).await?;

    let stack_name = change_set.stack_name().to_string();
    let change_set_name = change_set.name().to_string();
    let mut description = change_set.finish();

    // The post-execution describe may omit changes; report what was validated.
    if description.changes.is_empty() {
        description.changes = validated_changes;
    }

    Ok(DeploymentReport {
        stack_name,
        change_set_name,
        artifact: request.artifact().uri(),
        description,
    })
}

/// Warn about anything in the change set beyond a plain update of the target.
fn note_collateral_changes(
    description: &ChangeSetDescription,
    resource: &str,
    diag: &mut Diagnostics,
) {
    let others: Vec<&str> = description
        .changes
        .iter()
        .filter(|c| c.logical_resource_id != resource)
        .map(|c| c.logical_resource_id.as_str())
        .collect();
    if !others.is_empty() {
        diag.warn(Warning::collateral_changes(format!(
            "change set also modifies: {}",
            others.join(", ")
        )));
    }

    if description
        .changes
        .iter()
        .any(|c| c.logical_resource_id == resource && c.action == ChangeAction::Remove)
    {
        diag.warn(Warning::target_removed(format!(
            "change set removes resource '{resource}'"
        )));
    }
}
