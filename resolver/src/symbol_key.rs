//! Keys that identify declared entities.
use std::fmt;

/// The kind of a declared entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// A type, including a nested type (whose owner is the enclosing type).
    Type,
    /// A generic parameter of a type or of a method.
    GenericParameter,
    Field,
    Property,
    Event,
    Method,
    Constructor,
    LocalFunction,
    Parameter,
    LocalVariable,
}

impl SymbolKind {
    /// Returns true for kinds that may be overloaded and therefore are
    /// distinguished by their signature.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            SymbolKind::Method | SymbolKind::Constructor | SymbolKind::LocalFunction
        )
    }

    /// Returns true for kinds that are declared inside a method body or a
    /// method signature. These are owned by the method rather than by the
    /// enclosing type.
    pub fn is_body_scoped(&self) -> bool {
        matches!(
            self,
            SymbolKind::Parameter | SymbolKind::LocalVariable | SymbolKind::LocalFunction
        )
    }
}

/// The signature that distinguishes overloads of a callable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    /// Parameter type descriptors in declaration order.
    pub parameters: Vec<String>,
    pub generic_parameter_count: usize,
}

impl Signature {
    /// The signature of a callable without parameters.
    pub fn empty() -> Self {
        Signature::default()
    }

    pub fn of(parameters: &[&str]) -> Self {
        Signature {
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            generic_parameter_count: 0,
        }
    }

    pub fn with_generic_parameters(mut self, count: usize) -> Self {
        self.generic_parameter_count = count;
        self
    }
}

/// Identifies a declared entity.
///
/// Two keys are equal when every component is equal. Components are
/// compared exactly (case sensitive) and the order of parameters matters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey {
    owner: Option<String>,
    name: String,
    kind: SymbolKind,
    signature: Signature,
}

impl SymbolKey {
    pub fn new(owner: Option<&str>, name: &str, kind: SymbolKind, signature: Signature) -> Self {
        SymbolKey {
            owner: owner.map(|o| o.to_string()),
            name: name.to_string(),
            kind,
            signature,
        }
    }

    /// A top level type.
    pub fn of_type(name: &str) -> Self {
        SymbolKey::new(None, name, SymbolKind::Type, Signature::empty())
    }

    /// A generic type. The arity is part of the key so that `Box` and
    /// ``Box`1`` are different types.
    pub fn of_generic_type(name: &str, arity: usize) -> Self {
        SymbolKey::new(
            None,
            name,
            SymbolKind::Type,
            Signature::empty().with_generic_parameters(arity),
        )
    }

    /// A member that is not callable, for example a field or a parameter.
    pub fn member(owner: &str, name: &str, kind: SymbolKind) -> Self {
        SymbolKey::new(Some(owner), name, kind, Signature::empty())
    }

    /// A method, constructor or local function.
    pub fn callable(owner: &str, name: &str, kind: SymbolKind, signature: Signature) -> Self {
        SymbolKey::new(Some(owner), name, kind, signature)
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn parameters(&self) -> &[String] {
        &self.signature.parameters
    }

    pub fn generic_parameter_count(&self) -> usize {
        self.signature.generic_parameter_count
    }

    /// The name that entities declared inside this entity use as their
    /// owner, for example ``Owner.M`1(int,string)`` for a generic method.
    ///
    /// Callables always include the parameter list so that overloads own
    /// distinct parameters and locals.
    pub fn qualified_name(&self) -> String {
        let mut qualified = String::new();
        if let Some(owner) = &self.owner {
            qualified.push_str(owner);
            qualified.push('.');
        }
        qualified.push_str(&self.name);
        if self.signature.generic_parameter_count > 0 {
            qualified.push('`');
            qualified.push_str(&self.signature.generic_parameter_count.to_string());
        }
        if self.kind.is_callable() {
            qualified.push('(');
            qualified.push_str(&self.signature.parameters.join(","));
            qualified.push(')');
        }
        qualified
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.qualified_name())
    }
}
