//! The stack of owner contexts used for scope relative lookups.
use ilgen_dsl::diagnostic::{Diagnostic, Label};
use ilgen_problems::Problem;

use crate::symbol_key::{SymbolKey, SymbolKind};

/// The context entered while emitting the body of a type or of a method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    /// The qualified name of the type being emitted.
    pub owner: String,
    /// The method (or constructor, or local function) being emitted.
    pub method: Option<SymbolKey>,
}

impl Scope {
    pub fn of_type(owner: &str) -> Self {
        Scope {
            owner: owner.to_string(),
            method: None,
        }
    }

    pub fn of_method(owner: &str, method: SymbolKey) -> Self {
        Scope {
            owner: owner.to_string(),
            method: Some(method),
        }
    }

    /// The owner names under which this scope searches for an entity of
    /// the kind, most specific first.
    ///
    /// Parameters, locals and local functions belong to the method.
    /// Generic parameters may belong to the method or to the type. Every
    /// other kind belongs to the type.
    pub fn owners_for(&self, kind: SymbolKind) -> Vec<String> {
        let method = self.method.as_ref().map(|m| m.qualified_name());
        match kind {
            _ if kind.is_body_scoped() => method.into_iter().collect(),
            SymbolKind::GenericParameter => {
                method.into_iter().chain([self.owner.clone()]).collect()
            }
            _ => vec![self.owner.clone()],
        }
    }
}

/// Scopes in the order they were entered.
#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) -> Result<Scope, Diagnostic> {
        self.scopes.pop().ok_or_else(|| {
            Diagnostic::problem(
                Problem::UnbalancedScope,
                Label::new("Exit scope without a matching enter"),
            )
        })
    }

    /// The innermost scope.
    pub fn top(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Removes scopes until the stack has the depth.
    pub(crate) fn truncate(&mut self, depth: usize) {
        self.scopes.truncate(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_key::Signature;

    fn method_scope() -> Scope {
        Scope::of_method(
            "Owner",
            SymbolKey::callable(
                "Owner",
                "M",
                SymbolKind::Method,
                Signature::of(&["int"]).with_generic_parameters(1),
            ),
        )
    }

    #[test]
    fn owners_for_when_parameter_in_method_then_method_qualified_name() {
        assert_eq!(
            method_scope().owners_for(SymbolKind::Parameter),
            vec!["Owner.M`1(int)"]
        );
    }

    #[test]
    fn owners_for_when_field_in_method_then_type() {
        assert_eq!(method_scope().owners_for(SymbolKind::Field), vec!["Owner"]);
    }

    #[test]
    fn owners_for_when_generic_parameter_in_method_then_method_then_type() {
        assert_eq!(
            method_scope().owners_for(SymbolKind::GenericParameter),
            vec!["Owner.M`1(int)", "Owner"]
        );
    }

    #[test]
    fn owners_for_when_local_in_type_scope_then_none() {
        assert!(Scope::of_type("Owner")
            .owners_for(SymbolKind::LocalVariable)
            .is_empty());
    }

    #[test]
    fn pop_when_empty_then_unbalanced_scope() {
        let mut stack = ScopeStack::new();
        let err = stack.pop().unwrap_err();
        assert!(err.is(Problem::UnbalancedScope));
        assert!(err.is_internal());
    }

    #[test]
    fn top_when_nested_then_innermost() {
        let mut stack = ScopeStack::new();
        stack.push(Scope::of_type("Outer"));
        stack.push(Scope::of_type("Outer.Inner"));

        assert_eq!(stack.top().map(|s| s.owner.as_str()), Some("Outer.Inner"));
        assert_eq!(stack.depth(), 2);

        stack.pop().unwrap();
        assert_eq!(stack.top().map(|s| s.owner.as_str()), Some("Outer"));
    }
}
