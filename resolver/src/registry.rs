//! The flat store of definition variables.
use std::collections::HashMap;

use ilgen_dsl::diagnostic::{Diagnostic, Label};
use ilgen_problems::Problem;
use log::trace;

use crate::definition::DefinitionVariable;
use crate::symbol_key::{Signature, SymbolKey, SymbolKind};

// Owner, name and kind. Overloads of a callable share this.
type MemberName = (Option<String>, String, SymbolKind);

/// Every definition variable registered during a run, in registration
/// order.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    variables: Vec<DefinitionVariable>,
    by_key: HashMap<SymbolKey, usize>,
    by_member: HashMap<MemberName, Vec<usize>>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        SymbolRegistry::default()
    }

    /// Binds the key to the identifier.
    ///
    /// Returns an error if the key is already bound. That is a defect in
    /// the caller: each entity is declared exactly once.
    pub fn register(
        &mut self,
        key: SymbolKey,
        identifier: String,
    ) -> Result<DefinitionVariable, Diagnostic> {
        if let Some(existing) = self.by_key.get(&key).and_then(|i| self.variables.get(*i)) {
            return Err(Diagnostic::problem(
                Problem::DuplicateSymbolRegistration,
                Label::new(format!("Second registration of {}", key)),
            )
            .with_context("existing", existing.identifier())
            .with_context("requested", &identifier));
        }

        trace!("Register {} as {}", key, identifier);
        let index = self.variables.len();
        self.by_member
            .entry((key.owner().map(String::from), key.name().to_string(), key.kind()))
            .or_default()
            .push(index);
        self.by_key.insert(key.clone(), index);
        let variable = DefinitionVariable::bound(key, identifier);
        self.variables.push(variable.clone());
        Ok(variable)
    }

    /// Returns the variable bound to the key or the invalid variable.
    pub fn lookup(&self, key: &SymbolKey) -> DefinitionVariable {
        self.by_key
            .get(key)
            .and_then(|i| self.variables.get(*i))
            .cloned()
            .unwrap_or_else(DefinitionVariable::not_found)
    }

    /// Finds a member of the owner by name.
    ///
    /// With a signature the match is exact. Without a signature, a callable
    /// matches only when it has exactly one overload; several overloads are
    /// an error because the registry cannot choose between them.
    pub fn find_member(
        &self,
        owner: &str,
        name: &str,
        kind: SymbolKind,
        signature: Option<&Signature>,
    ) -> Result<DefinitionVariable, Diagnostic> {
        match signature {
            Some(signature) => Ok(self.lookup(&SymbolKey::new(
                Some(owner),
                name,
                kind,
                signature.clone(),
            ))),
            None if kind.is_callable() => {
                let candidates = self.overloads(owner, name, kind);
                match candidates.as_slice() {
                    [] => Ok(DefinitionVariable::not_found()),
                    [single] => Ok((*single).clone()),
                    [first, ..] => Err(Diagnostic::problem(
                        Problem::AmbiguousOverloadLookup,
                        Label::new(format!(
                            "{} overloads of {}.{}",
                            candidates.len(),
                            owner,
                            name
                        )),
                    )
                    .with_context("first", first.identifier())),
                }
            }
            None => Ok(self.lookup(&SymbolKey::member(owner, name, kind))),
        }
    }

    /// Every overload with the owner, name and kind, in registration order.
    pub fn overloads(&self, owner: &str, name: &str, kind: SymbolKind) -> Vec<&DefinitionVariable> {
        self.by_member
            .get(&(Some(owner.to_string()), name.to_string(), kind))
            .map(|indices| indices.iter().filter_map(|i| self.variables.get(*i)).collect())
            .unwrap_or_default()
    }

    /// Every variable of the kind in registration order.
    pub fn all_of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &DefinitionVariable> {
        self.variables
            .iter()
            .filter(move |v| v.key().map(|k| k.kind()) == Some(kind))
    }

    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DefinitionVariable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
