//! Orders the declared types of a library so that each type is visited
//! after the types it references.
//!
//! Ordering runs once, before translation. References that cannot be
//! satisfied by ordering (because they participate in a cycle) are reported
//! as discarded edges and must be resolved through forward references.

mod cycle_breaker;
pub mod stages;
pub mod toposort;
pub mod type_graph;

#[cfg(test)]
mod test_helpers;
