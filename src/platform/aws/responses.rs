// ABOUTME: JSON response shapes printed by the aws client.
// ABOUTME: Converted into the backend-neutral platform types.

use serde::Deserialize;

use crate::platform::error::PlatformError;
use crate::platform::traits::{
    ChangeAction, ChangeSetDescription, ChangeSetStatus, ExecutionStatus, ResourceChange,
    StackPage, StackStatus, StackSummary,
};
use crate::types::{ChangeSetId, StackId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListBucketsResponse {
    #[serde(default)]
    pub buckets: Vec<BucketEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct BucketEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListStacksResponse {
    #[serde(default)]
    stack_summaries: Vec<StackSummaryEntry>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackSummaryEntry {
    stack_name: String,
    stack_id: Option<StackId>,
    stack_status: StackStatus,
}

impl ListStacksResponse {
    pub fn into_page(self) -> StackPage {
        StackPage {
            stacks: self
                .stack_summaries
                .into_iter()
                .map(|entry| StackSummary {
                    stack_name: entry.stack_name,
                    stack_id: entry.stack_id,
                    stack_status: entry.stack_status,
                })
                .collect(),
            next_token: self.next_token.filter(|token| !token.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct CreateChangeSetResponse {
    id: Option<ChangeSetId>,
}

impl CreateChangeSetResponse {
    pub fn into_id(self) -> Result<ChangeSetId, PlatformError> {
        self.id.ok_or(PlatformError::MissingField {
            operation: "create-change-set".to_string(),
            field: "Id",
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DescribeChangeSetResponse {
    status: Option<ChangeSetStatus>,
    status_reason: Option<String>,
    execution_status: Option<ExecutionStatus>,
    #[serde(default)]
    changes: Vec<ChangeEntry>,
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ChangeEntry {
    resource_change: Option<ResourceChangeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceChangeEntry {
    logical_resource_id: Option<String>,
    action: Option<ChangeAction>,
}

impl DescribeChangeSetResponse {
    /// Fold every page of a describe call into one description.
    ///
    /// Statuses come from the first page; changes are concatenated in order.
    pub fn merge(
        id: &ChangeSetId,
        pages: Vec<DescribeChangeSetResponse>,
    ) -> Result<ChangeSetDescription, PlatformError> {
        let mut pages = pages.into_iter();
        let first = pages.next().ok_or(PlatformError::MissingField {
            operation: "describe-change-set".to_string(),
            field: "Status",
        })?;

        let status = first.status.ok_or(PlatformError::MissingField {
            operation: "describe-change-set".to_string(),
            field: "Status",
        })?;
        let execution_status = first
            .execution_status
            .unwrap_or(ExecutionStatus::Unavailable);

        let mut changes = Vec::new();
        for entries in std::iter::once(first.changes).chain(pages.map(|p| p.changes)) {
            changes.extend(entries.into_iter().filter_map(ChangeEntry::into_resource_change));
        }

        Ok(ChangeSetDescription {
            id: id.clone(),
            status,
            status_reason: first.status_reason,
            execution_status,
            changes,
        })
    }
}

impl ChangeEntry {
    fn into_resource_change(self) -> Option<ResourceChange> {
        let change = self.resource_change?;
        Some(ResourceChange {
            logical_resource_id: change.logical_resource_id?,
            action: change.action.unwrap_or(ChangeAction::Dynamic),
        })
    }
}
