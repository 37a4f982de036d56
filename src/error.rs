// ABOUTME: Application-wide error types for stackshift.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} failed: {}", .0.stage(), .0)]
    Deploy(#[from] DeployError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_errors_name_the_failing_stage() {
        let err = Error::from(DeployError::Precondition(
            "stack 'orders' either does not exist or is not ready for update".into(),
        ));
        assert_eq!(
            err.to_string(),
            "precondition check failed: stack 'orders' either does not exist or is not ready for update"
        );
    }
}
