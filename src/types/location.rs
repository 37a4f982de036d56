// ABOUTME: Bucket/key pair identifying a published artifact.
// ABOUTME: Renders as the fully-qualified s3:// URI handed to the template.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SCHEME: &str = "s3://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectLocationError {
    #[error("object location must start with s3://")]
    MissingScheme,

    #[error("object location is missing a bucket")]
    EmptyBucket,

    #[error("object location is missing a key")]
    EmptyKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    bucket: String,
    key: String,
}

impl ObjectLocation {
    pub fn new(bucket: &str, key: &str) -> Result<Self, ObjectLocationError> {
        if bucket.is_empty() {
            return Err(ObjectLocationError::EmptyBucket);
        }
        if key.is_empty() {
            return Err(ObjectLocationError::EmptyKey);
        }
        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The `s3://bucket/key` form.
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl FromStr for ObjectLocation {
    type Err = ObjectLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or(ObjectLocationError::MissingScheme)?;
        let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
        Self::new(bucket, key)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.bucket, self.key)
    }
}
