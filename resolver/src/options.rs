//! Options that control a resolution run.

/// What to do at the end of a run with callbacks that still wait for an
/// entity that was never registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnresolvedReferencePolicy {
    /// Report each awaited key as an unresolved forward reference.
    #[default]
    Fail,
    /// Discard the callbacks and log a warning.
    Drop,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    pub unresolved_references: UnresolvedReferencePolicy,
}

impl ResolverOptions {
    pub fn with_unresolved_references(mut self, policy: UnresolvedReferencePolicy) -> Self {
        self.unresolved_references = policy;
        self
    }
}
