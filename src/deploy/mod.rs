// ABOUTME: Change-set orchestration using the type state pattern.
// ABOUTME: Exports requests, state markers, polling, and the end-to-end driver.

mod change_set;
mod driver;
mod error;
mod poll;
mod request;
mod state;
mod transitions;

pub use change_set::ChangeSet;
pub use driver::{DeploymentReport, deploy, publish_artifact, update_stack};
pub use error::{DeployError, DeployErrorKind, Stage};
pub use poll::{Backoff, await_terminal};
pub use request::{DeploymentRequest, PublishRequest, UpdateRequest};
pub use state::{Created, Executed, Executing, Pending, Validated};
pub use transitions::{MAX_DESCRIPTION_LEN, check_execution, validate_targeted_change};
