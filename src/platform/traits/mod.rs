// ABOUTME: Capability traits for the remote collaborators a deployment drives.
// ABOUTME: Defines BlobStore and StackPlatform plus the types they exchange.

mod blob_store;
mod shared_types;
mod stacks;

pub use blob_store::BlobStore;
pub use shared_types::*;
pub use stacks::StackPlatform;
