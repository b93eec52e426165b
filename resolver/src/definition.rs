//! The binding between a declared entity and its generated identifier.
use std::fmt;

use crate::symbol_key::SymbolKey;

/// A declared entity bound to the identifier that the generated program
/// uses for it.
///
/// Lookups that find nothing return an invalid variable rather than an
/// error, because at many points the caller expects that the entity may
/// not be declared yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionVariable {
    key: Option<SymbolKey>,
    identifier: String,
}

impl DefinitionVariable {
    pub(crate) fn bound(key: SymbolKey, identifier: String) -> Self {
        DefinitionVariable {
            key: Some(key),
            identifier,
        }
    }

    /// The variable returned when nothing is bound.
    pub fn not_found() -> Self {
        DefinitionVariable {
            key: None,
            identifier: String::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    /// The key for the entity. `None` only for the invalid variable.
    pub fn key(&self) -> Option<&SymbolKey> {
        self.key.as_ref()
    }

    /// The generated identifier. Empty for the invalid variable.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Converts into an option that is `None` for the invalid variable.
    pub fn ok(self) -> Option<Self> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }
}

impl fmt::Display for DefinitionVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} => {}", key, self.identifier),
            None => f.write_str("<not found>"),
        }
    }
}
