//! Removes edges from the dependency graph until it has no cycles.
//!
//! While a strongly connected component with more than one node exists,
//! the edge with the smallest weight inside that component is discarded.
//! Ties go to the edge that was seen first. Every edge inside a strongly
//! connected component lies on some cycle, so each step breaks at least
//! one cycle and removes the weakest dependency of it.
//!
//! This is not a minimum feedback arc set. The order of the result is
//! observable, so the rule must stay exactly as is.
use fixedbitset::FixedBitSet;
use log::debug;
use petgraph::{algo::tarjan_scc, visit::NodeIndexable};

use crate::type_graph::{DeclaredType, TypeGraph};

/// An edge removed to make the graph acyclic. The reference that the edge
/// represents cannot rely on declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscardedEdge {
    pub from: DeclaredType,
    pub to: DeclaredType,
    pub weight: u32,
}

/// Discards edges until the graph is acyclic. Returns the discarded edges
/// in the order they were removed.
pub(crate) fn break_cycles(graph: &mut TypeGraph) -> Vec<DiscardedEdge> {
    let mut discarded = vec![];

    while let Some(component) = first_cyclic_component(graph) {
        let victim = graph
            .edges()
            .filter(|e| component.contains(e.from.index()) && component.contains(e.to.index()))
            .min_by_key(|e| (e.weight, e.id.index()));

        // A component with more than one node always has internal edges.
        let Some(victim) = victim else {
            break;
        };
        let (Some(from), Some(to)) = (
            graph.declared_type(victim.from).cloned(),
            graph.declared_type(victim.to).cloned(),
        ) else {
            break;
        };

        debug!(
            "Breaking cycle by discarding {} -> {} (weight {})",
            from, to, victim.weight
        );
        graph.graph.remove_edge(victim.id);
        discarded.push(DiscardedEdge {
            from,
            to,
            weight: victim.weight,
        });
    }

    discarded
}

/// Finds the strongly connected component with more than one node that
/// contains the earliest seen node.
fn first_cyclic_component(graph: &TypeGraph) -> Option<FixedBitSet> {
    let component = tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .min_by_key(|scc| scc.iter().min().copied())?;

    let mut members = FixedBitSet::with_capacity(graph.graph.node_bound());
    for node in component {
        members.insert(node.index());
    }
    Some(members)
}
