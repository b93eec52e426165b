//! Produces the order in which to visit the declared types.
//!
//! Cycles are broken first (see the cycle breaker), then the remaining
//! graph is sorted with Kahn's algorithm: a type is ready once every type
//! it references has been emitted and, among ready types, the type seen
//! first in the library is emitted first.
//!
//! ## Example
//!
//! ```ignore
//! class A : B, C {}
//! class B {}
//! class C {}
//! ```
//!
//! visits `B`, `C`, then `A`.
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;
use petgraph::Direction;

use crate::cycle_breaker::break_cycles;
pub use crate::cycle_breaker::DiscardedEdge;
use crate::type_graph::{DeclaredType, TypeGraph, TypeNode};

/// The visiting order for the declared types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeOrder {
    types: Vec<DeclaredType>,
    discarded: Vec<DiscardedEdge>,
}

impl TypeOrder {
    /// The declared types in visiting order.
    pub fn types(&self) -> &[DeclaredType] {
        &self.types
    }

    /// Edges removed to break cycles. For these references the referenced
    /// type may be visited after the referencing type.
    pub fn discarded(&self) -> &[DiscardedEdge] {
        &self.discarded
    }

    /// The display names in visiting order.
    pub fn names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.display_name()).collect()
    }

    /// Position of the type with the display name in the visiting order.
    pub fn position(&self, display_name: &str) -> Option<usize> {
        self.types
            .iter()
            .position(|t| t.display_name() == display_name)
    }

    /// Returns true if the reference from one type to another was discarded
    /// while breaking cycles.
    pub fn is_discarded(&self, from: &str, to: &str) -> bool {
        self.discarded
            .iter()
            .any(|d| d.from.display_name() == from && d.to.display_name() == to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclaredType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Sorts the graph into a total order over every declared type.
pub fn sort(mut graph: TypeGraph) -> TypeOrder {
    let discarded = break_cycles(&mut graph);

    // Number of referenced types that are not yet emitted, indexed by node.
    let bound = graph.nodes().map(|n| n.index() + 1).max().unwrap_or(0);
    let mut pending: Vec<usize> = vec![0; bound];
    let mut ready: BinaryHeap<Reverse<TypeNode>> = BinaryHeap::new();
    for node in graph.nodes() {
        let count = graph
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .count();
        pending[node.index()] = count;
        if count == 0 {
            ready.push(Reverse(node));
        }
    }

    let mut types = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(node)) = ready.pop() {
        if let Some(declared) = graph.declared_type(node) {
            types.push(declared.clone());
        }
        for dependent in graph.graph.neighbors_directed(node, Direction::Incoming) {
            let count = &mut pending[dependent.index()];
            *count -= 1;
            if *count == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    debug_assert_eq!(types.len(), graph.node_count());
    debug!(
        "Visiting order {:?}",
        types.iter().map(|t| t.display_name()).collect::<Vec<_>>()
    );

    TypeOrder { types, discarded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{class_with_fields, library_of};
    use crate::type_graph::build;
    use ilgen_dsl::decl::{Library, TypeDeclaration, TypeReference};
    use proptest::prelude::*;
    use rstest::rstest;

    fn order_of(lib: &Library) -> Vec<String> {
        sort(build(lib)).names()
    }

    #[test]
    fn sort_when_empty_then_empty() {
        let order = sort(build(&Library::new()));
        assert!(order.is_empty());
        assert!(order.discarded().is_empty());
    }

    #[test]
    fn sort_when_single_inheritance_then_base_first() {
        let lib = library_of(vec![
            TypeDeclaration::class("A").with_base(TypeReference::named("B")),
            TypeDeclaration::class("B"),
        ]);
        assert_eq!(order_of(&lib), vec!["B", "A"]);
    }

    #[test]
    fn sort_when_inheritance_chain_then_deepest_first() {
        let lib = library_of(vec![
            TypeDeclaration::class("A").with_base(TypeReference::named("B")),
            TypeDeclaration::class("B").with_base(TypeReference::named("C")),
            TypeDeclaration::class("C"),
        ]);
        assert_eq!(order_of(&lib), vec!["C", "B", "A"]);
    }

    #[test]
    fn sort_when_mutual_reference_then_weaker_edge_discarded() {
        let lib = library_of(vec![
            class_with_fields("A", &["B", "B"]).with_base(TypeReference::named("B")),
            class_with_fields("B", &["A"]),
        ]);

        let order = sort(build(&lib));

        assert_eq!(order.names(), vec!["B", "A"]);
        assert!(order.is_discarded("B", "A"));
        assert!(!order.is_discarded("A", "B"));
    }

    #[test]
    fn sort_when_base_and_interface_then_first_seen_dependency_first() {
        let lib = library_of(vec![
            TypeDeclaration::class("A")
                .with_base(TypeReference::named("B"))
                .with_interface(TypeReference::named("C")),
            TypeDeclaration::class("B"),
            TypeDeclaration::interface("C"),
        ]);
        assert_eq!(order_of(&lib), vec!["B", "C", "A"]);
    }

    #[rstest]
    #[case(vec![("A", vec![]), ("B", vec![]), ("C", vec![])], vec!["A", "B", "C"])]
    #[case(vec![("A", vec!["C"]), ("B", vec![]), ("C", vec![])], vec!["B", "C", "A"])]
    #[case(vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["A"])], vec!["A", "C", "B"])]
    #[case(vec![("Leaf", vec![]), ("Root", vec!["Mid"]), ("Mid", vec!["Leaf"])], vec!["Leaf", "Mid", "Root"])]
    fn sort_when_fields_then_expected_order(
        #[case] types: Vec<(&str, Vec<&str>)>,
        #[case] expected: Vec<&str>,
    ) {
        let lib = library_of(
            types
                .into_iter()
                .map(|(name, fields)| class_with_fields(name, &fields))
                .collect(),
        );
        assert_eq!(order_of(&lib), expected);
    }

    #[test]
    fn sort_when_unrelated_types_then_declaration_order() {
        let lib = library_of(vec![
            TypeDeclaration::class("Zeta"),
            TypeDeclaration::class("Alpha"),
        ]);
        assert_eq!(order_of(&lib), vec!["Zeta", "Alpha"]);
    }

    /// Generates a library of up to eight classes where each class has
    /// fields typed with arbitrary classes from the same library.
    fn arbitrary_library() -> impl Strategy<Value = Library> {
        (1usize..8).prop_flat_map(|count| {
            prop::collection::vec(prop::collection::vec(0..count, 0..6), count).prop_map(
                move |fields| {
                    let declarations = fields
                        .iter()
                        .enumerate()
                        .map(|(idx, targets)| {
                            let names: Vec<String> =
                                targets.iter().map(|t| format!("T{t}")).collect();
                            let refs: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
                            class_with_fields(&format!("T{idx}"), &refs)
                        })
                        .collect();
                    library_of(declarations)
                },
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn sort_when_arbitrary_library_then_permutation(lib in arbitrary_library()) {
            let mut names = order_of(&lib);
            names.sort();
            let mut expected: Vec<String> =
                lib.declarations.iter().map(|d| d.name.to_string()).collect();
            expected.sort();
            prop_assert_eq!(names, expected);
        }

        #[test]
        fn sort_when_arbitrary_library_then_kept_edges_respected(lib in arbitrary_library()) {
            let graph = build(&lib);
            let edges: Vec<(String, String)> = graph
                .edges()
                .map(|e| (
                    graph.declared_type(e.from).unwrap().display_name(),
                    graph.declared_type(e.to).unwrap().display_name(),
                ))
                .collect();

            let order = sort(graph);

            for (from, to) in edges {
                if !order.is_discarded(&from, &to) {
                    prop_assert!(order.position(&to) < order.position(&from));
                }
            }
        }

        #[test]
        fn sort_when_repeated_then_identical(lib in arbitrary_library()) {
            prop_assert_eq!(sort(build(&lib)), sort(build(&lib)));
        }
    }
}
