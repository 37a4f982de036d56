// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Storage classes, object locations, and change-set identity.

mod change_set_name;
mod id;
mod location;
mod storage_class;

pub use change_set_name::ChangeSetName;
pub use id::{ChangeSetId, StackId};
pub use location::{ObjectLocation, ObjectLocationError};
pub use storage_class::{ParseStorageClassError, StorageClass};
