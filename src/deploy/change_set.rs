// ABOUTME: Generic change-set handle parameterized by state marker.
// ABOUTME: The platform owns the change set; this type tracks what we have observed.

use crate::platform::ChangeSetDescription;
use crate::types::{ChangeSetId, ChangeSetName};

use super::state::{Created, Executed, Validated};

/// A change set in flight, parameterized by its lifecycle state.
///
/// Transitions consume the handle, so a change set that has not been
/// validated against its target resource cannot be executed.
#[derive(Debug)]
pub struct ChangeSet<S> {
    pub(crate) id: ChangeSetId,
    pub(crate) name: ChangeSetName,
    pub(crate) stack_name: String,
    pub(crate) state: S,
}

impl<S> ChangeSet<S> {
    /// Platform-assigned identifier.
    pub fn id(&self) -> &ChangeSetId {
        &self.id
    }

    /// Client-chosen name.
    pub fn name(&self) -> &ChangeSetName {
        &self.name
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }
}

impl ChangeSet<Created> {
    /// Description observed when computation finished.
    pub fn description(&self) -> &ChangeSetDescription {
        &self.state.description
    }
}

impl ChangeSet<Validated> {
    pub fn description(&self) -> &ChangeSetDescription {
        &self.state.description
    }
}

impl ChangeSet<Executed> {
    /// Description observed after execution settled.
    pub fn description(&self) -> &ChangeSetDescription {
        &self.state.description
    }
}
