//! Type mentions: every position in which a declaration names a type.
//!
//! The dependency graph consumes mentions verbatim, so the mentions of a
//! declaration are the complete record of what that declaration depends on.
use crate::core::Id;
use crate::decl::{MethodDeclaration, TypeDeclaration, TypeReference, UsageKind};
use crate::visitor::{
    visit_method_declaration, visit_type_declaration, visit_type_reference, Visitor,
};

/// The syntactic position of a type mention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MentionKind {
    BaseType,
    Interface,
    GenericConstraint,
    GenericArgument,
    FieldType,
    PropertyType,
    EventType,
    ParameterType,
    ReturnType,
    LocalVariable,
    Cast,
    Is,
    As,
    TypeOf,
    NameOf,
    ObjectCreation,
    AttributeType,
    AttributeArgument,
}

impl From<UsageKind> for MentionKind {
    fn from(value: UsageKind) -> Self {
        match value {
            UsageKind::LocalVariable => MentionKind::LocalVariable,
            UsageKind::Cast => MentionKind::Cast,
            UsageKind::Is => MentionKind::Is,
            UsageKind::As => MentionKind::As,
            UsageKind::TypeOf => MentionKind::TypeOf,
            UsageKind::NameOf => MentionKind::NameOf,
            UsageKind::ObjectCreation => MentionKind::ObjectCreation,
        }
    }
}

/// One occurrence of a type name inside a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMention {
    pub kind: MentionKind,
    pub target: Id,
    /// Generic arity of the mentioned type.
    pub arity: usize,
}

impl TypeDeclaration {
    /// Enumerates every type mention in the declaration, in source order.
    ///
    /// Mentions of generic arguments follow the mention of the generic type,
    /// so `List<Order>` yields `List` then `Order`. Names of generic
    /// parameters of the type or of an enclosing method are not mentions.
    pub fn mentions(&self) -> Vec<TypeMention> {
        let mut collector = MentionCollector {
            mentions: vec![],
            generic_parameters: vec![],
        };
        collector.visit_type_declaration(self);
        collector.mentions
    }
}

struct MentionCollector {
    mentions: Vec<TypeMention>,
    // Generic parameters in scope, innermost last.
    generic_parameters: Vec<Id>,
}

impl Visitor for MentionCollector {
    fn visit_type_declaration(&mut self, node: &TypeDeclaration) {
        let depth = self.generic_parameters.len();
        self.generic_parameters
            .extend(node.generic_parameters.iter().map(|p| p.name.clone()));
        visit_type_declaration(self, node);
        self.generic_parameters.truncate(depth);
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration) {
        let depth = self.generic_parameters.len();
        self.generic_parameters
            .extend(node.generic_parameters.iter().map(|p| p.name.clone()));
        visit_method_declaration(self, node);
        self.generic_parameters.truncate(depth);
    }

    fn visit_type_reference(&mut self, node: &TypeReference, kind: MentionKind) {
        if node.arguments.is_empty() && self.generic_parameters.contains(&node.name) {
            return;
        }
        self.mentions.push(TypeMention {
            kind,
            target: node.name.clone(),
            arity: node.arity(),
        });
        visit_type_reference(self, node, kind)
    }
}
