//! A trait and functions for visiting every node in a declaration tree.
//!
//! To use the visitor, define a struct and implement the Visitor trait
//! for the struct. Override only the functions of interest and call the
//! free function of the same name to continue the recursion.
//!
//! # Example
//!
//! ```
//! use ilgen_dsl::decl::TypeDeclaration;
//! use ilgen_dsl::visitor::{visit_type_declaration, Visitor};
//!
//! struct CountTypes {
//!     count: usize,
//! }
//!
//! impl Visitor for CountTypes {
//!     fn visit_type_declaration(&mut self, node: &TypeDeclaration) {
//!         self.count += 1;
//!         visit_type_declaration(self, node)
//!     }
//! }
//! ```
use crate::decl::*;
use crate::mention::MentionKind;

pub trait Visitor {
    fn walk(&mut self, node: &Library) {
        visit_library(self, node)
    }

    fn visit_type_declaration(&mut self, node: &TypeDeclaration) {
        visit_type_declaration(self, node)
    }

    fn visit_generic_parameter(&mut self, node: &GenericParameter) {
        visit_generic_parameter(self, node)
    }

    fn visit_attribute(&mut self, node: &Attribute) {
        visit_attribute(self, node)
    }

    fn visit_member_declaration(&mut self, node: &MemberDeclaration) {
        visit_member_declaration(self, node)
    }

    fn visit_field_declaration(&mut self, node: &FieldDeclaration) {
        visit_field_declaration(self, node)
    }

    fn visit_property_declaration(&mut self, node: &PropertyDeclaration) {
        visit_property_declaration(self, node)
    }

    fn visit_event_declaration(&mut self, node: &EventDeclaration) {
        visit_event_declaration(self, node)
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration) {
        visit_method_declaration(self, node)
    }

    fn visit_constructor_declaration(&mut self, node: &ConstructorDeclaration) {
        visit_constructor_declaration(self, node)
    }

    fn visit_parameter(&mut self, node: &Parameter) {
        visit_parameter(self, node)
    }

    fn visit_body_type_use(&mut self, node: &BodyTypeUse) {
        visit_body_type_use(self, node)
    }

    /// Visits a reference to a type. The kind describes the position in
    /// which the reference appears.
    fn visit_type_reference(&mut self, node: &TypeReference, kind: MentionKind) {
        visit_type_reference(self, node, kind)
    }
}

pub fn visit_library<V: Visitor + ?Sized>(v: &mut V, node: &Library) {
    for decl in &node.declarations {
        v.visit_type_declaration(decl);
    }
}

pub fn visit_type_declaration<V: Visitor + ?Sized>(v: &mut V, node: &TypeDeclaration) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    for parameter in &node.generic_parameters {
        v.visit_generic_parameter(parameter);
    }
    if let Some(base) = &node.base_type {
        v.visit_type_reference(base, MentionKind::BaseType);
    }
    for interface in &node.interfaces {
        v.visit_type_reference(interface, MentionKind::Interface);
    }
    for member in &node.members {
        v.visit_member_declaration(member);
    }
}

pub fn visit_generic_parameter<V: Visitor + ?Sized>(v: &mut V, node: &GenericParameter) {
    for constraint in &node.constraints {
        v.visit_type_reference(constraint, MentionKind::GenericConstraint);
    }
}

pub fn visit_attribute<V: Visitor + ?Sized>(v: &mut V, node: &Attribute) {
    v.visit_type_reference(&node.attribute_type, MentionKind::AttributeType);
    for argument in &node.argument_types {
        v.visit_type_reference(argument, MentionKind::AttributeArgument);
    }
}

pub fn visit_member_declaration<V: Visitor + ?Sized>(v: &mut V, node: &MemberDeclaration) {
    match node {
        MemberDeclaration::Field(field) => v.visit_field_declaration(field),
        MemberDeclaration::Property(property) => v.visit_property_declaration(property),
        MemberDeclaration::Event(event) => v.visit_event_declaration(event),
        MemberDeclaration::Method(method) => v.visit_method_declaration(method),
        MemberDeclaration::Constructor(ctor) => v.visit_constructor_declaration(ctor),
    }
}

pub fn visit_field_declaration<V: Visitor + ?Sized>(v: &mut V, node: &FieldDeclaration) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    v.visit_type_reference(&node.field_type, MentionKind::FieldType);
}

pub fn visit_property_declaration<V: Visitor + ?Sized>(v: &mut V, node: &PropertyDeclaration) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    v.visit_type_reference(&node.property_type, MentionKind::PropertyType);
    for body_use in &node.body {
        v.visit_body_type_use(body_use);
    }
}

pub fn visit_event_declaration<V: Visitor + ?Sized>(v: &mut V, node: &EventDeclaration) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    v.visit_type_reference(&node.event_type, MentionKind::EventType);
}

pub fn visit_method_declaration<V: Visitor + ?Sized>(v: &mut V, node: &MethodDeclaration) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    for parameter in &node.generic_parameters {
        v.visit_generic_parameter(parameter);
    }
    if let Some(return_type) = &node.return_type {
        v.visit_type_reference(return_type, MentionKind::ReturnType);
    }
    for parameter in &node.parameters {
        v.visit_parameter(parameter);
    }
    for body_use in &node.body {
        v.visit_body_type_use(body_use);
    }
    for local_function in &node.local_functions {
        v.visit_method_declaration(local_function);
    }
}

pub fn visit_constructor_declaration<V: Visitor + ?Sized>(
    v: &mut V,
    node: &ConstructorDeclaration,
) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    for parameter in &node.parameters {
        v.visit_parameter(parameter);
    }
    for body_use in &node.body {
        v.visit_body_type_use(body_use);
    }
}

pub fn visit_parameter<V: Visitor + ?Sized>(v: &mut V, node: &Parameter) {
    for attribute in &node.attributes {
        v.visit_attribute(attribute);
    }
    v.visit_type_reference(&node.parameter_type, MentionKind::ParameterType);
}

pub fn visit_body_type_use<V: Visitor + ?Sized>(v: &mut V, node: &BodyTypeUse) {
    v.visit_type_reference(&node.used_type, MentionKind::from(node.kind));
}

pub fn visit_type_reference<V: Visitor + ?Sized>(v: &mut V, node: &TypeReference, _kind: MentionKind) {
    for argument in &node.arguments {
        v.visit_type_reference(argument, MentionKind::GenericArgument);
    }
}
