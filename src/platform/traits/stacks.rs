// ABOUTME: Stack platform operations used to drive change sets.
// ABOUTME: Paginated stack listing plus the change-set create/describe/execute calls.

use super::shared_types::{ChangeSetDescription, CreateChangeSetInput, StackPage, StackStatus};
use crate::platform::PlatformError;
use crate::types::ChangeSetId;
use async_trait::async_trait;

/// Declarative stack management with change-set updates.
#[async_trait]
pub trait StackPlatform: Send + Sync {
    /// One page of stacks whose status is in `status_filter`.
    ///
    /// Pass the `next_token` of the previous page to continue a listing.
    async fn list_stacks(
        &self,
        status_filter: &[StackStatus],
        next_token: Option<&str>,
    ) -> Result<StackPage, PlatformError>;

    /// Propose an update to an existing stack. Never creates a stack.
    async fn create_change_set(
        &self,
        input: &CreateChangeSetInput,
    ) -> Result<ChangeSetId, PlatformError>;

    /// Current state of a change set.
    async fn describe_change_set(
        &self,
        id: &ChangeSetId,
    ) -> Result<ChangeSetDescription, PlatformError>;

    /// Apply a computed change set to its stack.
    async fn execute_change_set(&self, id: &ChangeSetId) -> Result<(), PlatformError>;
}
