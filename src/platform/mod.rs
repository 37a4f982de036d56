// ABOUTME: Remote collaborators: blob store and stack platform.
// ABOUTME: Re-exports the capability traits and the AWS CLI and in-memory backends.

pub mod aws;
mod error;
pub mod memory;
pub mod traits;

pub use aws::AwsCli;
pub use error::{PlatformError, PlatformErrorKind};
pub use traits::*;
