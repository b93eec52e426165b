//! Builds the weighted dependency graph of the declared types.
//!
//! Each declared type is a node. An edge `T -> U` exists when the
//! declaration of `T` mentions `U` in any position (base type, member
//! type, generic argument, attribute, body use and so on) and the weight
//! of the edge is the number of such mentions.
//!
//! ## Example
//!
//! ```ignore
//! class A : B { B b1; B b2; }
//! class B { A a; }
//! ```
//!
//! yields `A -> B` with weight 3 and `B -> A` with weight 1.
//!
//! Only types declared in the library are nodes. Mentions of other types
//! (for example types from referenced assemblies) need no ordering and
//! are ignored, as are mentions of a type inside its own declaration.
use std::collections::HashMap;
use std::fmt;

use ilgen_dsl::{
    core::Id,
    decl::{Library, TypeDeclaration, TypeKind},
};
use log::trace;
use petgraph::{
    stable_graph::{EdgeIndex, NodeIndex, StableDiGraph},
    visit::{EdgeRef, IntoEdgeReferences},
};

pub type TypeNode = NodeIndex;

/// A type declared in the library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredType {
    pub name: Id,
    pub arity: usize,
    pub kind: TypeKind,
}

impl DeclaredType {
    /// The name followed by the generic arity, for example ``List`1``.
    pub fn display_name(&self) -> String {
        if self.arity == 0 {
            self.name.to_string()
        } else {
            format!("{}`{}", self.name, self.arity)
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Edge from a referencing type to a referenced type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DependencyEdge {
    /// Number of mentions for the ordered pair.
    pub weight: u32,
}

/// An edge of the graph as seen by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeInfo {
    pub id: EdgeIndex,
    pub from: TypeNode,
    pub to: TypeNode,
    pub weight: u32,
}

/// The dependency graph.
///
/// Node and edge indices increase in the order in which the nodes and edges
/// were first seen. Ordering and cycle breaking use that order to break ties
/// so the result is reproducible.
pub struct TypeGraph {
    pub(crate) graph: StableDiGraph<DeclaredType, DependencyEdge, u32>,

    // Maps name and generic arity to the node for the type.
    nodes: HashMap<(Id, usize), TypeNode>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            nodes: HashMap::new(),
        }
    }

    /// Adds the declared type. Partial declarations of the same type map
    /// to the node created for the first declaration.
    pub fn add_type(&mut self, decl: &TypeDeclaration) -> TypeNode {
        let key = (decl.name.clone(), decl.arity());
        match self.nodes.get(&key) {
            Some(existing) => *existing,
            None => {
                let node = self.graph.add_node(DeclaredType {
                    name: decl.name.clone(),
                    arity: decl.arity(),
                    kind: decl.kind,
                });
                self.nodes.insert(key, node);
                node
            }
        }
    }

    /// Returns the node for the type with the name and arity if the type is
    /// declared in the library.
    pub fn find(&self, name: &Id, arity: usize) -> Option<TypeNode> {
        self.nodes.get(&(name.clone(), arity)).copied()
    }

    /// Records one mention of `to` in the declaration of `from`.
    pub fn add_mention(&mut self, from: TypeNode, to: TypeNode) {
        if from == to {
            return;
        }
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge) {
                    weight.weight += 1;
                }
            }
            None => {
                self.graph.add_edge(from, to, DependencyEdge { weight: 1 });
            }
        }
    }

    pub fn declared_type(&self, node: TypeNode) -> Option<&DeclaredType> {
        self.graph.node_weight(node)
    }

    /// The nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = TypeNode> + '_ {
        self.graph.node_indices()
    }

    /// The edges in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeInfo> + '_ {
        self.graph.edge_references().map(|edge| EdgeInfo {
            id: edge.id(),
            from: edge.source(),
            to: edge.target(),
            weight: edge.weight().weight,
        })
    }

    /// The weight of the edge between the types, if any.
    pub fn weight(&self, from: TypeNode, to: TypeNode) -> Option<u32> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(|edge| edge.weight)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the dependency graph for the library. Never fails.
pub fn build(lib: &Library) -> TypeGraph {
    let mut graph = TypeGraph::new();

    // Add every declaration first so that the node order is the declaration
    // order and so that mentions of later declarations resolve.
    let from_nodes: Vec<TypeNode> = lib
        .declarations
        .iter()
        .map(|decl| graph.add_type(decl))
        .collect();

    for (decl, from) in lib.declarations.iter().zip(from_nodes) {
        for mention in decl.mentions() {
            match graph.find(&mention.target, mention.arity) {
                Some(to) => {
                    trace!("{} -> {} ({:?})", decl.name, mention.target, mention.kind);
                    graph.add_mention(from, to);
                }
                None => {
                    // Not declared in this library
                }
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{class_with_fields, library_of};
    use ilgen_dsl::decl::{
        Attribute, GenericParameter, MethodDeclaration, TypeReference, UsageKind,
    };

    fn node(graph: &TypeGraph, name: &str) -> TypeNode {
        graph.find(&Id::from(name), 0).unwrap()
    }

    #[test]
    fn build_when_empty_library_then_empty_graph() {
        let graph = build(&Library::new());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn build_when_base_and_fields_then_weight_counts_mentions() {
        let lib = library_of(vec![
            class_with_fields("A", &["B", "B"]).with_base(TypeReference::named("B")),
            class_with_fields("B", &["A"]),
        ]);

        let graph = build(&lib);

        let a = node(&graph, "A");
        let b = node(&graph, "B");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(a, b), Some(3));
        assert_eq!(graph.weight(b, a), Some(1));
    }

    #[test]
    fn build_when_mentions_external_type_then_no_edge() {
        let lib = library_of(vec![class_with_fields("A", &["string", "Guid"])]);

        let graph = build(&lib);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn build_when_self_reference_then_no_edge() {
        let lib = library_of(vec![class_with_fields("Node", &["Node", "Node"])]);

        let graph = build(&lib);

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn build_when_partial_declarations_then_single_node() {
        let lib = library_of(vec![
            class_with_fields("A", &["B"]),
            TypeDeclaration::class("B"),
            class_with_fields("A", &["B"]),
        ]);

        let graph = build(&lib);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.weight(node(&graph, "A"), node(&graph, "B")), Some(2));
    }

    #[test]
    fn build_when_same_name_different_arity_then_distinct_types() {
        let lib = library_of(vec![
            TypeDeclaration::class("Box"),
            TypeDeclaration::class("Box").with_generic_parameter(GenericParameter::new("T")),
            TypeDeclaration::class("User").with_field(
                "boxed",
                TypeReference::generic("Box", vec![TypeReference::named("int")]),
            ),
        ]);

        let graph = build(&lib);

        let user = node(&graph, "User");
        let plain = node(&graph, "Box");
        let generic = graph.find(&Id::from("Box"), 1).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.weight(user, generic), Some(1));
        assert_eq!(graph.weight(user, plain), None);
    }

    #[test]
    fn build_when_attributes_generics_and_body_then_all_counted() {
        let method = MethodDeclaration::new("Run")
            .with_attribute(Attribute::new(TypeReference::named("Marker")).with_argument(
                TypeReference::named("Payload"),
            ))
            .with_use(UsageKind::As, TypeReference::named("Payload"))
            .with_use(UsageKind::TypeOf, TypeReference::named("Payload"));
        let lib = library_of(vec![
            TypeDeclaration::class("Service")
                .with_generic_parameter(
                    GenericParameter::new("T").with_constraint(TypeReference::named("Payload")),
                )
                .with_method(method),
            TypeDeclaration::class("Marker"),
            TypeDeclaration::class("Payload"),
        ]);

        let graph = build(&lib);

        let service = graph.find(&Id::from("Service"), 1).unwrap();
        assert_eq!(graph.weight(service, node(&graph, "Marker")), Some(1));
        assert_eq!(graph.weight(service, node(&graph, "Payload")), Some(4));
    }

    #[test]
    fn build_when_generic_parameter_shares_type_name_then_no_edge() {
        let lib = library_of(vec![
            TypeDeclaration::class("T"),
            TypeDeclaration::class("Box")
                .with_generic_parameter(GenericParameter::new("T"))
                .with_field("value", TypeReference::named("T")),
        ]);

        let graph = build(&lib);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn edges_when_built_then_first_seen_order() {
        let lib = library_of(vec![
            class_with_fields("A", &["C", "B"]),
            TypeDeclaration::class("B"),
            TypeDeclaration::class("C"),
        ]);

        let graph = build(&lib);

        let targets: Vec<String> = graph
            .edges()
            .map(|e| graph.declared_type(e.to).unwrap().display_name())
            .collect();
        assert_eq!(targets, vec!["C", "B"]);
    }
}
