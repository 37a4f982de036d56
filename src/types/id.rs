// ABOUTME: Phantom-typed identifiers for platform-assigned ids.
// ABOUTME: Keeps change-set ids and stack ids from being swapped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub enum ChangeSetMarker {}
pub enum StackMarker {}

/// An opaque identifier assigned by the stack platform.
///
/// The marker parameter stops a `StackId` from being passed where a
/// `ChangeSetId` is expected; both are plain strings on the wire.
#[must_use = "IDs reference remote resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// Manual impls: T is only a marker and implements nothing.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

pub type ChangeSetId = Id<ChangeSetMarker>;
pub type StackId = Id<StackMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_by_value() {
        let a = ChangeSetId::new("arn:aws:cloudformation:cs/1");
        let b = ChangeSetId::new("arn:aws:cloudformation:cs/1".to_string());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "arn:aws:cloudformation:cs/1");
    }

    #[test]
    fn ids_deserialize_from_plain_strings() {
        let id: StackId = serde_json::from_str("\"stack-123\"").unwrap();
        assert_eq!(id.as_str(), "stack-123");
    }
}
