// ABOUTME: Storage tier for published artifacts.
// ABOUTME: Only the tiers suited to small, frequently-read objects are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("storage class must be one of [STANDARD|STANDARD_IA|ONEZONE_IA], got '{0}'")]
pub struct ParseStorageClassError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageClass {
    #[default]
    Standard,
    StandardIa,
    OnezoneIa,
}

impl StorageClass {
    pub const ALL: [StorageClass; 3] = [
        StorageClass::Standard,
        StorageClass::StandardIa,
        StorageClass::OnezoneIa,
    ];

    /// Wire name understood by the blob store.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "STANDARD",
            StorageClass::StandardIa => "STANDARD_IA",
            StorageClass::OnezoneIa => "ONEZONE_IA",
        }
    }
}

impl FromStr for StorageClass {
    type Err = ParseStorageClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| ParseStorageClassError(s.to_string()))
    }
}

impl TryFrom<String> for StorageClass {
    type Error = ParseStorageClassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StorageClass> for String {
    fn from(value: StorageClass) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for class in StorageClass::ALL {
            assert_eq!(class.as_str().parse::<StorageClass>().unwrap(), class);
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_tiers() {
        assert!("GLACIER".parse::<StorageClass>().is_err());
        assert!("standard".parse::<StorageClass>().is_err());
        assert!("".parse::<StorageClass>().is_err());
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(StorageClass::default(), StorageClass::Standard);
    }
}
