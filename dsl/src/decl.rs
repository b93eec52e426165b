//! The declaration tree supplied by the front end.
//!
//! The tree describes only what the resolution engine needs: the declared
//! types and every position in which a declaration names another type.
//! Expressions and statements are reduced to the types they use.
use serde::{Deserialize, Serialize};

use crate::core::Id;

/// The complete set of declarations for one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub declarations: Vec<TypeDeclaration>,
}

impl Library {
    pub fn new() -> Self {
        Library::default()
    }

    pub fn with_declaration(mut self, declaration: TypeDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Kind of a declared type. The engine treats this as an opaque tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Record,
}

/// A reference to a type by name, possibly with generic arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    pub name: Id,
    #[serde(default)]
    pub arguments: Vec<TypeReference>,
}

impl TypeReference {
    pub fn named(name: &str) -> Self {
        TypeReference {
            name: Id::from(name),
            arguments: vec![],
        }
    }

    pub fn generic(name: &str, arguments: Vec<TypeReference>) -> Self {
        TypeReference {
            name: Id::from(name),
            arguments,
        }
    }

    /// The number of generic arguments. A reference matches a declaration
    /// only when the name and the arity are the same.
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: Id,
    #[serde(default)]
    pub constraints: Vec<TypeReference>,
}

impl GenericParameter {
    pub fn new(name: &str) -> Self {
        GenericParameter {
            name: Id::from(name),
            constraints: vec![],
        }
    }

    pub fn with_constraint(mut self, constraint: TypeReference) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// An attribute application. Arguments are reduced to the types they
/// name (for example the operand of `typeof` or the type of an enum value).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub attribute_type: TypeReference,
    #[serde(default)]
    pub argument_types: Vec<TypeReference>,
}

impl Attribute {
    pub fn new(attribute_type: TypeReference) -> Self {
        Attribute {
            attribute_type,
            argument_types: vec![],
        }
    }

    pub fn with_argument(mut self, argument_type: TypeReference) -> Self {
        self.argument_types.push(argument_type);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Id,
    pub parameter_type: TypeReference,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Parameter {
    pub fn new(name: &str, parameter_type: TypeReference) -> Self {
        Parameter {
            name: Id::from(name),
            parameter_type,
            attributes: vec![],
        }
    }
}

/// How a body uses a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    LocalVariable,
    Cast,
    Is,
    As,
    TypeOf,
    NameOf,
    ObjectCreation,
}

/// A type used inside a method, constructor or accessor body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTypeUse {
    pub kind: UsageKind,
    pub used_type: TypeReference,
}

impl BodyTypeUse {
    pub fn new(kind: UsageKind, used_type: TypeReference) -> Self {
        BodyTypeUse { kind, used_type }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: Id,
    pub field_type: TypeReference,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: Id,
    pub property_type: TypeReference,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Type uses in the accessor bodies.
    #[serde(default)]
    pub body: Vec<BodyTypeUse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDeclaration {
    pub name: Id,
    pub event_type: TypeReference,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// A method, or a local function declared inside a method body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: Id,
    #[serde(default)]
    pub return_type: Option<TypeReference>,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub body: Vec<BodyTypeUse>,
    #[serde(default)]
    pub local_functions: Vec<MethodDeclaration>,
}

impl MethodDeclaration {
    pub fn new(name: &str) -> Self {
        MethodDeclaration {
            name: Id::from(name),
            return_type: None,
            generic_parameters: vec![],
            parameters: vec![],
            attributes: vec![],
            body: vec![],
            local_functions: vec![],
        }
    }

    pub fn returning(mut self, return_type: TypeReference) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_generic_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_use(mut self, kind: UsageKind, used_type: TypeReference) -> Self {
        self.body.push(BodyTypeUse::new(kind, used_type));
        self
    }

    pub fn with_local_function(mut self, local_function: MethodDeclaration) -> Self {
        self.local_functions.push(local_function);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub body: Vec<BodyTypeUse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDeclaration {
    Field(FieldDeclaration),
    Property(PropertyDeclaration),
    Event(EventDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
}

/// A declared type and its members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: Id,
    pub kind: TypeKind,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameter>,
    #[serde(default)]
    pub base_type: Option<TypeReference>,
    #[serde(default)]
    pub interfaces: Vec<TypeReference>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
}

impl TypeDeclaration {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        TypeDeclaration {
            name: Id::from(name),
            kind,
            generic_parameters: vec![],
            base_type: None,
            interfaces: vec![],
            attributes: vec![],
            members: vec![],
        }
    }

    pub fn class(name: &str) -> Self {
        TypeDeclaration::new(name, TypeKind::Class)
    }

    pub fn interface(name: &str) -> Self {
        TypeDeclaration::new(name, TypeKind::Interface)
    }

    /// The number of generic parameters of the type.
    pub fn arity(&self) -> usize {
        self.generic_parameters.len()
    }

    pub fn with_base(mut self, base_type: TypeReference) -> Self {
        self.base_type = Some(base_type);
        self
    }

    pub fn with_interface(mut self, interface: TypeReference) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_generic_parameter(mut self, parameter: GenericParameter) -> Self {
        self.generic_parameters.push(parameter);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_field(mut self, name: &str, field_type: TypeReference) -> Self {
        self.members.push(MemberDeclaration::Field(FieldDeclaration {
            name: Id::from(name),
            field_type,
            attributes: vec![],
        }));
        self
    }

    pub fn with_property(mut self, name: &str, property_type: TypeReference) -> Self {
        self.members.push(MemberDeclaration::Property(PropertyDeclaration {
            name: Id::from(name),
            property_type,
            attributes: vec![],
            body: vec![],
        }));
        self
    }

    pub fn with_event(mut self, name: &str, event_type: TypeReference) -> Self {
        self.members.push(MemberDeclaration::Event(EventDeclaration {
            name: Id::from(name),
            event_type,
            attributes: vec![],
        }));
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.members.push(MemberDeclaration::Method(method));
        self
    }

    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }
}
