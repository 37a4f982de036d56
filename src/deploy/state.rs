// ABOUTME: Change-set state marker types for the type state pattern.
// ABOUTME: States that have observed the platform carry the description they saw.

use crate::platform::ChangeSetDescription;

/// Submitted; the platform is computing the diff.
/// Available actions: `await_created()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Computation finished, successfully or not.
/// Available actions: `validate_target()`
#[derive(Debug, Clone)]
pub struct Created {
    pub(crate) description: ChangeSetDescription,
}

/// Computed and confirmed to touch the intended resource.
/// Available actions: `execute()`
#[derive(Debug, Clone)]
pub struct Validated {
    pub(crate) description: ChangeSetDescription,
}

/// Execution requested.
/// Available actions: `await_executed()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Executing;

/// Executed and settled cleanly.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Executed {
    pub(crate) description: ChangeSetDescription,
}
