//! The ordering pass as a single stage (to enable testing).

use ilgen_dsl::decl::Library;
use log::debug;

use crate::{
    toposort::{self, TypeOrder},
    type_graph,
};

/// Orders the declared types of the library so that every type comes after
/// the types it references, except for references discarded to break
/// cycles. Never fails; an empty library yields an empty order.
pub fn order_declarations(lib: &Library) -> TypeOrder {
    let graph = type_graph::build(lib);
    debug!(
        "Dependency graph has {} types and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let order = toposort::sort(graph);
    for discarded in order.discarded() {
        debug!(
            "Reference {} -> {} must be resolved as a forward reference",
            discarded.from, discarded.to
        );
    }
    order
}
