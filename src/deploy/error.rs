// ABOUTME: Error types for deployment stages.
// ABOUTME: Each variant maps to the stage that failed, carrying the platform's reason.

use std::fmt;
use std::time::Duration;

use crate::platform::{ExecutionStatus, PlatformError};

/// The deployment stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Publish,
    Precondition,
    Creation,
    Scope,
    Execution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validation => "validation",
            Stage::Publish => "publish",
            Stage::Precondition => "precondition check",
            Stage::Creation => "change set creation",
            Stage::Scope => "change set validation",
            Stage::Execution => "change set execution",
        })
    }
}

/// Errors that abort a deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A parameter is missing, blank, or failed a post-check.
    #[error("{parameter}: {reason}")]
    Validation { parameter: String, reason: String },

    /// The artifact could not be read or written to the blob store.
    #[error("failed to publish artifact to {location}: {source}")]
    Publish {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The stack is not updatable or the template contract is violated.
    #[error("{0}")]
    Precondition(String),

    /// The platform refused or failed to compute the change set.
    #[error("change set '{change_set}' creation FAILED - {reason}")]
    Creation { change_set: String, reason: String },

    /// The change set does not modify the resource it was meant to.
    #[error(
        "change set '{change_set}' does not modify resource '{resource}' - check the artifact"
    )]
    Scope { change_set: String, resource: String },

    /// Execution was refused or failed.
    #[error("change set '{change_set}' execution FAILED - {reason}")]
    Execution { change_set: String, reason: String },

    /// Execution finished but the change set did not settle as available.
    #[error("change set '{change_set}' execution status is '{status}'")]
    ExecutionState {
        change_set: String,
        status: ExecutionStatus,
    },

    /// The change set did not reach a terminal status in time.
    #[error(
        "change set '{change_set}' did not reach a terminal status within {}s",
        .waited.as_secs()
    )]
    Timeout {
        change_set: String,
        stage: Stage,
        waited: Duration,
    },

    /// A read against the platform failed.
    #[error("{source}")]
    Platform {
        stage: Stage,
        #[source]
        source: PlatformError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Validation,
    Publish,
    Precondition,
    Creation,
    Scope,
    Execution,
    ExecutionState,
    Timeout,
    Platform,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Validation { .. } => DeployErrorKind::Validation,
            DeployError::Publish { .. } => DeployErrorKind::Publish,
            DeployError::Precondition(_) => DeployErrorKind::Precondition,
            DeployError::Creation { .. } => DeployErrorKind::Creation,
            DeployError::Scope { .. } => DeployErrorKind::Scope,
            DeployError::Execution { .. } => DeployErrorKind::Execution,
            DeployError::ExecutionState { .. } => DeployErrorKind::ExecutionState,
            DeployError::Timeout { .. } => DeployErrorKind::Timeout,
            DeployError::Platform { .. } => DeployErrorKind::Platform,
        }
    }

    /// The stage that failed, for operator-facing messages.
    pub fn stage(&self) -> Stage {
        match self {
            DeployError::Validation { .. } => Stage::Validation,
            DeployError::Publish { .. } => Stage::Publish,
            DeployError::Precondition(_) => Stage::Precondition,
            DeployError::Creation { .. } => Stage::Creation,
            DeployError::Scope { .. } => Stage::Scope,
            DeployError::Execution { .. } | DeployError::ExecutionState { .. } => {
                Stage::Execution
            }
            DeployError::Timeout { stage, .. } | DeployError::Platform { stage, .. } => *stage,
        }
    }

    pub(crate) fn validation(parameter: &str, reason: impl Into<String>) -> Self {
        DeployError::Validation {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn publish(
        location: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        DeployError::Publish {
            location: location.into(),
            source: source.into(),
        }
    }

    pub(crate) fn platform(stage: Stage) -> impl FnOnce(PlatformError) -> Self {
        move |source| DeployError::Platform { stage, source }
    }
}
