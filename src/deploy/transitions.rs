// ABOUTME: State transition methods for change-set orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::config::PollConfig;
use crate::platform::{
    ChangeSetDescription, ChangeSetStatus, CreateChangeSetInput, ExecutionStatus, StackPlatform,
    TemplateParameter,
};
use crate::types::ChangeSetName;

use super::ChangeSet;
use super::error::{DeployError, Stage};
use super::poll::await_terminal;
use super::request::UpdateRequest;
use super::state::{Created, Executed, Executing, Pending, Validated};

/// Longest change-set description the platform accepts.
pub const MAX_DESCRIPTION_LEN: usize = 1024;

// =============================================================================
// Gates
// =============================================================================

/// Check that a computed change set actually modifies `expected_resource`.
///
/// # Errors
///
/// `DeployError::Creation` if computation failed, with the platform's
/// reason. `DeployError::Scope` if no proposed change names the resource.
pub fn validate_targeted_change(
    description: &ChangeSetDescription,
    expected_resource: &str,
) -> Result<(), DeployError> {
    if description.status == ChangeSetStatus::Failed {
        return Err(DeployError::Creation {
            change_set: description.id.to_string(),
            reason: reason_or_unknown(description),
        });
    }

    if !description.touches(expected_resource) {
        return Err(DeployError::Scope {
            change_set: description.id.to_string(),
            resource: expected_resource.to_string(),
        });
    }

    Ok(())
}

/// Check the description observed after execution.
///
/// # Errors
///
/// `DeployError::Execution` if the change set failed,
/// `DeployError::ExecutionState` if it is not back to `AVAILABLE`.
pub fn check_execution(description: &ChangeSetDescription) -> Result<(), DeployError> {
    if description.status == ChangeSetStatus::Failed {
        return Err(DeployError::Execution {
            change_set: description.id.to_string(),
            reason: reason_or_unknown(description),
        });
    }

    if description.execution_status != ExecutionStatus::Available {
        return Err(DeployError::ExecutionState {
            change_set: description.id.to_string(),
            status: description.execution_status.clone(),
        });
    }

    Ok(())
}

fn reason_or_unknown(description: &ChangeSetDescription) -> String {
    description
        .status_reason
        .clone()
        .unwrap_or_else(|| "no reason given".to_string())
}

/// Clip a description to the platform limit on a char boundary.
pub(crate) fn clip_description(description: &str) -> (&str, bool) {
    if description.chars().count() <= MAX_DESCRIPTION_LEN {
        return (description, false);
    }
    let end = description
        .char_indices()
        .nth(MAX_DESCRIPTION_LEN)
        .map(|(i, _)| i)
        .unwrap_or(description.len());
    (&description[..end], true)
}

// =============================================================================
// -> Pending
// =============================================================================

impl ChangeSet<Pending> {
    /// Submit an update change set for the request's stack.
    ///
    /// The full template body is sent every time; the platform's transform
    /// is what picks up the new artifact. Both parameters are explicit.
    ///
    /// # Errors
    ///
    /// `DeployError::Creation` if the platform rejects the request.
    #[must_use = "change set state must be used"]
    pub async fn create<P: StackPlatform + ?Sized>(
        platform: &P,
        request: &UpdateRequest,
        template_body: String,
    ) -> Result<ChangeSet<Pending>, DeployError> {
        let name = ChangeSetName::generate();
        let (description, _) = clip_description(request.description());

        let input = CreateChangeSetInput {
            stack_name: request.stack_name().to_string(),
            template_body,
            parameters: vec![
                TemplateParameter::explicit(request.key_parameter(), request.artifact().uri()),
                TemplateParameter::explicit(request.resource_parameter(), request.resource()),
            ],
            capabilities: request.capabilities().to_vec(),
            description: description.to_string(),
            change_set_name: name.clone(),
        };

        tracing::info!(
            "Creating change set {} for stack {}",
            name,
            request.stack_name()
        );

        let id = platform
            .create_change_set(&input)
            .await
            .map_err(|e| DeployError::Creation {
                change_set: name.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Change set {} has id {}", name, id);

        Ok(ChangeSet {
            id,
            name,
            stack_name: input.stack_name,
            state: Pending,
        })
    }
}

// =============================================================================
// Pending -> Created
// =============================================================================

impl ChangeSet<Pending> {
    /// Wait for the platform to finish computing the change set.
    ///
    /// A change set that fails to compute still moves to `Created`;
    /// `validate_target` is what rejects it.
    ///
    /// # Errors
    ///
    /// `DeployError::Timeout` if the wait budget runs out, or
    /// `DeployError::Platform` if a describe call fails.
    #[must_use = "change set state must be used"]
    pub async fn await_created<P: StackPlatform + ?Sized>(
        self,
        platform: &P,
        poll: &PollConfig,
    ) -> Result<ChangeSet<Created>, DeployError> {
        let description = await_terminal(platform, &self.id, poll, Stage::Creation).await?;
        Ok(ChangeSet {
            id: self.id,
            name: self.name,
            stack_name: self.stack_name,
            state: Created { description },
        })
    }
}

// =============================================================================
// Created -> Validated
// =============================================================================

impl ChangeSet<Created> {
    /// Confirm the change set modifies `expected_resource`.
    ///
    /// # Errors
    ///
    /// See [`validate_targeted_change`].
    #[must_use = "change set state must be used"]
    pub fn validate_target(
        self,
        expected_resource: &str,
    ) -> Result<ChangeSet<Validated>, DeployError> {
        validate_targeted_change(&self.state.description, expected_resource)?;
        Ok(ChangeSet {
            id: self.id,
            name: self.name,
            stack_name: self.stack_name,
            state: Validated {
                description: self.state.description,
            },
        })
    }
}

// =============================================================================
// Validated -> Executing
// =============================================================================

impl ChangeSet<Validated> {
    /// Ask the platform to apply the change set.
    ///
    /// # Errors
    ///
    /// `DeployError::Execution` if the platform refuses.
    #[must_use = "change set state must be used"]
    pub async fn execute<P: StackPlatform + ?Sized>(
        self,
        platform: &P,
    ) -> Result<ChangeSet<Executing>, DeployError> {
        tracing::info!("Executing change set {}", self.name);

        platform
            .execute_change_set(&self.id)
            .await
            .map_err(|e| DeployError::Execution {
                change_set: self.id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(ChangeSet {
            id: self.id,
            name: self.name,
            stack_name: self.stack_name,
            state: Executing,
        })
    }
}

// =============================================================================
// Executing -> Executed
// =============================================================================

impl ChangeSet<Executing> {
    /// Wait for a terminal status again, then check how execution settled.
    ///
    /// # Errors
    ///
    /// See [`check_execution`]; also `Timeout` and `Platform` as for
    /// `await_created`.
    #[must_use = "change set state must be used"]
    pub async fn await_executed<P: StackPlatform + ?Sized>(
        self,
        platform: &P,
        poll: &PollConfig,
    ) -> Result<ChangeSet<Executed>, DeployError> {
        let description = await_terminal(platform, &self.id, poll, Stage::Execution).await?;
        check_execution(&description)?;

        tracing::info!("Change set {} executed", self.name);

        Ok(ChangeSet {
            id: self.id,
            name: self.name,
            stack_name: self.stack_name,
            state: Executed { description },
        })
    }
}

// =============================================================================
// Executed (terminal)
// =============================================================================

impl ChangeSet<Executed> {
    /// Consume the handle, returning the final description.
    pub fn finish(self) -> ChangeSetDescription {
        self.state.description
    }
}
