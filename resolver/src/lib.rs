//! Resolves references between the entities of the generated program.
//!
//! Every declared entity is identified by a [`SymbolKey`] and bound, once,
//! to the identifier that the generated program uses for it. Consumers
//! look identifiers up through a per-run [`ResolutionContext`] and, when an
//! entity is not declared yet, register a callback that runs as soon as it
//! is.

// Allow large errors because diagnostics carry labels and context.
#![allow(clippy::result_large_err)]

mod broker;
mod context;
mod definition;
mod options;
mod registry;
mod scope;
mod symbol_key;

#[cfg(test)]
mod test_helpers;

pub use broker::ForwardReferenceBroker;
pub use context::{ResolutionContext, RunSummary, ScopeGuard};
pub use definition::DefinitionVariable;
pub use options::{ResolverOptions, UnresolvedReferencePolicy};
pub use registry::SymbolRegistry;
pub use scope::{Scope, ScopeStack};
pub use symbol_key::{Signature, SymbolKey, SymbolKind};
