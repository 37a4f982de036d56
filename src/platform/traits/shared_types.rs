// ABOUTME: Shared types used across the blob-store and stack-platform traits.
// ABOUTME: Status enums keep unknown wire values instead of failing to decode.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ChangeSetId, ChangeSetName, StackId, StorageClass};

/// Declares a status enum backed by fixed wire strings.
///
/// Unrecognized values decode into `Other` so a platform that grows a new
/// status does not break polling.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                let known = match value.as_str() {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                };
                known.unwrap_or_else(|| $name::Other(value))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Stack lifecycle status as reported by stack listings.
    StackStatus {
        CreateComplete => "CREATE_COMPLETE",
        UpdateComplete => "UPDATE_COMPLETE",
        UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
        RollbackComplete => "ROLLBACK_COMPLETE",
        UpdateInProgress => "UPDATE_IN_PROGRESS",
    }
}

impl StackStatus {
    /// Statuses in which a stack accepts a change-set update.
    pub fn updatable() -> [StackStatus; 2] {
        [StackStatus::CreateComplete, StackStatus::UpdateComplete]
    }
}

wire_enum! {
    /// Change-set computation status.
    ChangeSetStatus {
        CreatePending => "CREATE_PENDING",
        CreateInProgress => "CREATE_IN_PROGRESS",
        CreateComplete => "CREATE_COMPLETE",
        DeletePending => "DELETE_PENDING",
        DeleteInProgress => "DELETE_IN_PROGRESS",
        DeleteComplete => "DELETE_COMPLETE",
        DeleteFailed => "DELETE_FAILED",
        Failed => "FAILED",
    }
}

impl ChangeSetStatus {
    /// Polling stops once the change set reaches one of these.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChangeSetStatus::CreateComplete | ChangeSetStatus::Failed)
    }
}

wire_enum! {
    /// Whether a change set can be, or is being, executed.
    ExecutionStatus {
        Unavailable => "UNAVAILABLE",
        Available => "AVAILABLE",
        ExecuteInProgress => "EXECUTE_IN_PROGRESS",
        ExecuteComplete => "EXECUTE_COMPLETE",
        ExecuteFailed => "EXECUTE_FAILED",
        Obsolete => "OBSOLETE",
    }
}

wire_enum! {
    /// What a change set proposes to do to one resource.
    ChangeAction {
        Add => "Add",
        Modify => "Modify",
        Remove => "Remove",
        Import => "Import",
        Dynamic => "Dynamic",
    }
}

wire_enum! {
    /// Acknowledgements required for templates that touch identity resources.
    Capability {
        Iam => "CAPABILITY_IAM",
        NamedIam => "CAPABILITY_NAMED_IAM",
        AutoExpand => "CAPABILITY_AUTO_EXPAND",
    }
}

impl Capability {
    /// Capabilities sent when none are configured.
    pub fn defaults() -> Vec<Capability> {
        vec![Capability::Iam, Capability::NamedIam]
    }
}

/// One entry of a paginated stack listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSummary {
    pub stack_name: String,
    pub stack_id: Option<StackId>,
    pub stack_status: StackStatus,
}

/// One page of a stack listing.
#[derive(Debug, Clone, Default)]
pub struct StackPage {
    pub stacks: Vec<StackSummary>,
    pub next_token: Option<String>,
}

/// One proposed change to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceChange {
    pub logical_resource_id: String,
    pub action: ChangeAction,
}

impl ResourceChange {
    pub fn new(logical_resource_id: impl Into<String>, action: ChangeAction) -> Self {
        Self {
            logical_resource_id: logical_resource_id.into(),
            action,
        }
    }
}

/// A snapshot of a change set as the platform currently reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSetDescription {
    pub id: ChangeSetId,
    pub status: ChangeSetStatus,
    pub status_reason: Option<String>,
    pub execution_status: ExecutionStatus,
    pub changes: Vec<ResourceChange>,
}

impl ChangeSetDescription {
    /// Whether any proposed change targets `logical_resource_id`.
    pub fn touches(&self, logical_resource_id: &str) -> bool {
        self.changes
            .iter()
            .any(|change| change.logical_resource_id == logical_resource_id)
    }
}

/// A template parameter value supplied with a change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateParameter {
    pub parameter_key: String,
    pub parameter_value: String,
    pub use_previous_value: bool,
}

impl TemplateParameter {
    /// An explicit value; the previous value is never reused.
    pub fn explicit(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter_key: key.into(),
            parameter_value: value.into(),
            use_previous_value: false,
        }
    }
}

/// Everything needed to propose an update to an existing stack.
#[derive(Debug, Clone)]
pub struct CreateChangeSetInput {
    pub stack_name: String,
    pub template_body: String,
    pub parameters: Vec<TemplateParameter>,
    pub capabilities: Vec<Capability>,
    pub description: String,
    pub change_set_name: ChangeSetName,
}

/// A single object write.
#[derive(Debug, Clone, Copy)]
pub struct PutObject<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    pub body: &'a [u8],
    pub content_type: &'a str,
    pub storage_class: StorageClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_statuses_are_preserved() {
        let status = ChangeSetStatus::from("CREATE_SOMETHING_NEW");
        assert_eq!(status, ChangeSetStatus::Other("CREATE_SOMETHING_NEW".into()));
        assert_eq!(status.as_str(), "CREATE_SOMETHING_NEW");
        assert!(!status.is_terminal());
    }

    #[test]
    fn only_complete_and_failed_are_terminal() {
        assert!(ChangeSetStatus::CreateComplete.is_terminal());
        assert!(ChangeSetStatus::Failed.is_terminal());
        assert!(!ChangeSetStatus::CreatePending.is_terminal());
        assert!(!ChangeSetStatus::CreateInProgress.is_terminal());
        assert!(!ChangeSetStatus::DeleteFailed.is_terminal());
    }

    #[test]
    fn statuses_decode_from_json_strings() {
        let status: ExecutionStatus = serde_json::from_str("\"AVAILABLE\"").unwrap();
        assert_eq!(status, ExecutionStatus::Available);
        let action: ChangeAction = serde_json::from_str("\"Modify\"").unwrap();
        assert_eq!(action, ChangeAction::Modify);
    }

    #[test]
    fn template_parameters_serialize_in_wire_shape() {
        let param = TemplateParameter::explicit("S3Key", "s3://bucket/key.json");
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["ParameterKey"], "S3Key");
        assert_eq!(json["ParameterValue"], "s3://bucket/key.json");
        assert_eq!(json["UsePreviousValue"], false);
    }

    #[test]
    fn description_touches_matches_logical_id_exactly() {
        let description = ChangeSetDescription {
            id: ChangeSetId::new("cs-1"),
            status: ChangeSetStatus::CreateComplete,
            status_reason: None,
            execution_status: ExecutionStatus::Available,
            changes: vec![ResourceChange::new("MyStateMachine", ChangeAction::Modify)],
        };
        assert!(description.touches("MyStateMachine"));
        assert!(!description.touches("MyStateMachineRole"));
        assert!(!description.touches("mystatemachine"));
    }
}
