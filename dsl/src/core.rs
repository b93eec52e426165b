//! Identifiers shared by every part of the declaration tree.
use core::fmt;

use serde::{Deserialize, Serialize};

/// An identifier from the source program.
///
/// Identifiers in the source language are case sensitive, so equality and
/// hashing use the original text.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Id {
    pub original: String,
}

impl Id {
    /// Converts a `&str` into an `Id`.
    pub fn from(str: &str) -> Self {
        Id {
            original: String::from(str),
        }
    }

    pub fn as_str(&self) -> &str {
        self.original.as_str()
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id { original: value }
    }
}

impl From<Id> for String {
    fn from(value: Id) -> Self {
        value.original
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_when_same_text_then_equal_and_same_hash() {
        let mut set = HashSet::new();
        set.insert(Id::from("Order"));
        let converted: Id = String::from("Order").into();
        assert!(set.contains(&converted));
    }

    #[test]
    fn id_when_different_case_then_not_equal() {
        assert_ne!(Id::from("order"), Id::from("Order"));
    }

    #[test]
    fn id_when_serialized_then_plain_string() {
        let json = serde_json::to_string(&Id::from("Customer")).unwrap();
        assert_eq!(json, "\"Customer\"");

        let id: Id = serde_json::from_str("\"Customer\"").unwrap();
        assert_eq!(id, Id::from("Customer"));
    }
}
