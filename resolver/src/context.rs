//! The state of one resolution run.
//!
//! A [`ResolutionContext`] bundles the symbol registry, the forward
//! reference broker and the scope stack. Emitters receive the context
//! mutably and so do the callbacks that wait for forward references, which
//! lets a callback register further entities or wait for other entities.
//!
//! ## Example
//!
//! ```
//! use ilgen_resolver::{ResolutionContext, ResolverOptions, SymbolKey};
//!
//! let mut ctx = ResolutionContext::new(ResolverOptions::default());
//! ctx.register_pending(SymbolKey::of_type("B"), "A.b", |_ctx, variable, field| {
//!     assert_eq!(field, "A.b");
//!     assert_eq!(variable.identifier(), "B");
//!     Ok(())
//! })
//! .unwrap();
//! ctx.register(SymbolKey::of_type("B"), "B").unwrap();
//!
//! assert_eq!(ctx.finish().unwrap().fired_callbacks, 1);
//! ```
use std::ops::{Deref, DerefMut};

use ilgen_dsl::diagnostic::{Diagnostic, Label};
use ilgen_problems::Problem;
use log::{debug, trace, warn};

use crate::broker::ForwardReferenceBroker;
use crate::definition::DefinitionVariable;
use crate::options::{ResolverOptions, UnresolvedReferencePolicy};
use crate::registry::SymbolRegistry;
use crate::scope::{Scope, ScopeStack};
use crate::symbol_key::{Signature, SymbolKey, SymbolKind};

/// Counts that describe a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The number of registered entities.
    pub registered: usize,
    /// The number of callbacks that ran.
    pub fired_callbacks: usize,
    /// The number of callbacks discarded at the end of the run because the
    /// entity they waited for was never registered.
    pub dropped_callbacks: usize,
}

#[derive(Debug, Default)]
pub struct ResolutionContext {
    options: ResolverOptions,
    registry: SymbolRegistry,
    broker: ForwardReferenceBroker,
    scopes: ScopeStack,
    fired_callbacks: usize,
    // Scope guards that found the stack at an unexpected depth.
    scope_defects: Vec<String>,
}

impl ResolutionContext {
    pub fn new(options: ResolverOptions) -> Self {
        ResolutionContext {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn broker(&self) -> &ForwardReferenceBroker {
        &self.broker
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// Binds the key to the identifier and then runs every callback that
    /// waits for the key, in the order they were registered.
    ///
    /// Returns an error if the key is already bound or if a callback
    /// returns an error. In both cases the run cannot continue.
    pub fn register(
        &mut self,
        key: SymbolKey,
        identifier: impl Into<String>,
    ) -> Result<DefinitionVariable, Diagnostic> {
        let variable = self.registry.register(key, identifier.into())?;

        let waiting = variable.key().and_then(|key| self.broker.take(key));
        if let Some(mut callbacks) = waiting {
            debug!(
                "Resolving {} forward references to {}",
                callbacks.len(),
                variable
            );
            while let Some(callback) = callbacks.pop_front() {
                self.fired_callbacks += 1;
                callback(self, &variable)?;
            }
        }

        Ok(variable)
    }

    /// Returns the variable bound to the key or the invalid variable.
    pub fn lookup(&self, key: &SymbolKey) -> DefinitionVariable {
        self.registry.lookup(key)
    }

    /// Finds an entity by name relative to the innermost scope.
    ///
    /// Only the innermost scope is searched, so a name missing there is
    /// not found even if an enclosing type declares it. Parameters, locals
    /// and local functions are owned by the method of the scope; generic
    /// parameters by the method and then the type; other members by the
    /// type. Omitting the signature of a callable that has several
    /// overloads is an error.
    pub fn lookup_in_scope(
        &self,
        name: &str,
        kind: SymbolKind,
        signature: Option<&Signature>,
    ) -> Result<DefinitionVariable, Diagnostic> {
        for owner in self.scope_owners(name, kind)? {
            let found = self.registry.find_member(&owner, name, kind, signature)?;
            if found.is_valid() {
                return Ok(found);
            }
        }
        Ok(DefinitionVariable::not_found())
    }

    /// Builds the key for an entity declared in the innermost scope.
    pub fn key_in_scope(
        &self,
        name: &str,
        kind: SymbolKind,
        signature: Signature,
    ) -> Result<SymbolKey, Diagnostic> {
        let owners = self.scope_owners(name, kind)?;
        let owner = owners.first().map(String::as_str);
        Ok(SymbolKey::new(owner, name, kind, signature))
    }

    // The owners in the innermost scope that may declare an entity of the
    // kind. Never empty.
    fn scope_owners(&self, name: &str, kind: SymbolKind) -> Result<Vec<String>, Diagnostic> {
        let Some(scope) = self.scopes.top() else {
            return Err(Diagnostic::problem(
                Problem::UnbalancedScope,
                Label::new(format!("Lookup of {} without an active scope", name)),
            ));
        };
        let owners = scope.owners_for(kind);
        if owners.is_empty() {
            return Err(Diagnostic::problem(
                Problem::KindNotOwnedByScope,
                Label::new(format!("{:?} {} outside of a method body", kind, name)),
            )
            .with_context("scope", &scope.owner));
        }
        Ok(owners)
    }

    /// Runs the callback once the key is registered.
    ///
    /// If the key is already registered, the callback runs now. Otherwise
    /// the callback waits, together with the state, until a later call to
    /// [`ResolutionContext::register`] binds the key.
    pub fn register_pending<S, F>(
        &mut self,
        key: SymbolKey,
        state: S,
        callback: F,
    ) -> Result<(), Diagnostic>
    where
        S: 'static,
        F: FnOnce(&mut ResolutionContext, &DefinitionVariable, S) -> Result<(), Diagnostic>
            + 'static,
    {
        let existing = self.registry.lookup(&key);
        if existing.is_valid() {
            self.fired_callbacks += 1;
            return callback(self, &existing, state);
        }

        trace!("Waiting for {}", key);
        self.broker.enqueue(
            key,
            Box::new(
                move |ctx: &mut ResolutionContext, variable: &DefinitionVariable| {
                    callback(ctx, variable, state)
                },
            ),
        );
        Ok(())
    }

    /// The number of callbacks waiting for an entity.
    pub fn pending_count(&self) -> usize {
        self.broker.pending_count()
    }

    /// The keys that callbacks wait for, in the order first awaited.
    pub fn pending_keys(&self) -> Vec<&SymbolKey> {
        self.broker.pending_keys()
    }

    /// Every registered entity of the kind, in registration order.
    pub fn all_of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &DefinitionVariable> {
        self.registry.all_of_kind(kind)
    }

    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.registry.contains(key)
    }

    /// The number of registered entities.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn push_scope(&mut self, scope: Scope) {
        trace!("Enter {:?}", scope);
        self.scopes.push(scope);
    }

    pub fn pop_scope(&mut self) -> Result<Scope, Diagnostic> {
        let scope = self.scopes.pop()?;
        trace!("Exit {:?}", scope);
        Ok(scope)
    }

    /// Enters the body of the type. The scope ends when the guard drops.
    pub fn enter_type(&mut self, owner: &str) -> ScopeGuard<'_> {
        self.push_scope(Scope::of_type(owner));
        ScopeGuard::new(self)
    }

    /// Enters the body of the method. The scope ends when the guard drops.
    pub fn enter_method(&mut self, method: &SymbolKey) -> ScopeGuard<'_> {
        let owner = self
            .scopes
            .top()
            .map(|scope| scope.owner.clone())
            .or_else(|| method.owner().map(String::from))
            .unwrap_or_default();
        self.push_scope(Scope::of_method(&owner, method.clone()));
        ScopeGuard::new(self)
    }

    /// Ends the run.
    ///
    /// Returns the diagnostics for scopes that were not exited and, unless
    /// the options say otherwise, for callbacks that still wait for an
    /// entity.
    pub fn finish(mut self) -> Result<RunSummary, Vec<Diagnostic>> {
        let mut diagnostics = vec![];

        if !self.scopes.is_empty() {
            let innermost = self
                .scopes
                .top()
                .map(|scope| scope.owner.clone())
                .unwrap_or_default();
            diagnostics.push(
                Diagnostic::problem(
                    Problem::UnbalancedScope,
                    Label::new("Run finished with active scopes"),
                )
                .with_context("depth", &self.scopes.depth().to_string())
                .with_context("innermost", &innermost),
            );
        }
        for defect in self.scope_defects.drain(..) {
            diagnostics.push(Diagnostic::problem(
                Problem::UnbalancedScope,
                Label::new(defect),
            ));
        }

        let mut dropped_callbacks = 0;
        for (key, count) in self.broker.drain() {
            match self.options.unresolved_references {
                UnresolvedReferencePolicy::Fail => diagnostics.push(
                    Diagnostic::problem(
                        Problem::UnresolvedForwardReference,
                        Label::new(format!("{} never registered", key)),
                    )
                    .with_context("callbacks", &count.to_string()),
                ),
                UnresolvedReferencePolicy::Drop => {
                    warn!("Dropping {} callbacks waiting for {}", count, key);
                    dropped_callbacks += count;
                }
            }
        }

        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        let summary = RunSummary {
            registered: self.registry.len(),
            fired_callbacks: self.fired_callbacks,
            dropped_callbacks,
        };
        debug!("Resolution finished {:?}", summary);
        Ok(summary)
    }

    // Closes the scope that a guard opened at the depth.
    fn close_scope(&mut self, depth: usize) {
        if self.scopes.depth() != depth {
            let defect = format!(
                "Scope opened at depth {} closed at depth {}",
                depth,
                self.scopes.depth()
            );
            warn!("{}", defect);
            self.scope_defects.push(defect);
        }
        self.scopes.truncate(depth.saturating_sub(1));
    }
}

/// Exits a scope when dropped, including when the caller returns early
/// with an error.
pub struct ScopeGuard<'a> {
    context: &'a mut ResolutionContext,
    depth: usize,
}

impl<'a> ScopeGuard<'a> {
    fn new(context: &'a mut ResolutionContext) -> Self {
        let depth = context.scopes.depth();
        ScopeGuard { context, depth }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = ResolutionContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.context.close_scope(self.depth);
    }
}
