// ABOUTME: Client-chosen change-set names.
// ABOUTME: Generated fresh for every update so names never collide.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeSetName(String);

impl ChangeSetName {
    /// A new unique name: `A` followed by the 32 hex digits of a v4 UUID.
    ///
    /// Change-set names must start with a letter, which a bare UUID does
    /// not guarantee.
    pub fn generate() -> Self {
        Self(format!("A{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_start_with_a_letter() {
        let name = ChangeSetName::generate();
        assert!(name.as_str().starts_with('A'));
        assert_eq!(name.as_str().len(), 33);
        assert!(name.as_str()[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_names_are_unique() {
        assert_ne!(ChangeSetName::generate(), ChangeSetName::generate());
    }
}
