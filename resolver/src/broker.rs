//! Callbacks that wait for an entity to be registered.
//!
//! A consumer that needs the identifier of an entity that is not declared
//! yet registers a callback for the entity's key. When the entity is
//! registered, every callback waiting for it runs, in the order the
//! callbacks were registered, before the registration returns.
use std::collections::{HashMap, VecDeque};
use std::fmt;

use ilgen_dsl::diagnostic::Diagnostic;

use crate::context::ResolutionContext;
use crate::definition::DefinitionVariable;
use crate::symbol_key::SymbolKey;

/// A callback with the state of the consumer captured inside it.
pub(crate) type PendingCallback =
    Box<dyn FnOnce(&mut ResolutionContext, &DefinitionVariable) -> Result<(), Diagnostic>>;

struct PendingQueue {
    // Order in which the key was first awaited.
    sequence: usize,
    callbacks: VecDeque<PendingCallback>,
}

/// Keys that are awaited but not registered, each with the callbacks that
/// wait for it.
#[derive(Default)]
pub struct ForwardReferenceBroker {
    pending: HashMap<SymbolKey, PendingQueue>,
    next_sequence: usize,
}

impl ForwardReferenceBroker {
    pub fn new() -> Self {
        ForwardReferenceBroker::default()
    }

    /// Adds the callback to the end of the queue for the key.
    pub(crate) fn enqueue(&mut self, key: SymbolKey, callback: PendingCallback) {
        let sequence = self.next_sequence;
        let queue = self.pending.entry(key).or_insert_with(|| PendingQueue {
            sequence,
            callbacks: VecDeque::new(),
        });
        if queue.sequence == sequence {
            self.next_sequence += 1;
        }
        queue.callbacks.push_back(callback);
    }

    /// Removes the queue for the key. The callbacks are in the order that
    /// they were enqueued.
    pub(crate) fn take(&mut self, key: &SymbolKey) -> Option<VecDeque<PendingCallback>> {
        self.pending.remove(key).map(|queue| queue.callbacks)
    }

    /// Removes every queue. Returns each awaited key with the number of
    /// callbacks waiting for it, in the order the keys were first awaited.
    pub(crate) fn drain(&mut self) -> Vec<(SymbolKey, usize)> {
        let mut drained: Vec<(usize, SymbolKey, usize)> = self
            .pending
            .drain()
            .map(|(key, queue)| (queue.sequence, key, queue.callbacks.len()))
            .collect();
        drained.sort_by_key(|(sequence, _, _)| *sequence);
        drained
            .into_iter()
            .map(|(_, key, count)| (key, count))
            .collect()
    }

    /// The number of callbacks waiting for any key.
    pub fn pending_count(&self) -> usize {
        self.pending.values().map(|q| q.callbacks.len()).sum()
    }

    /// The awaited keys in the order they were first awaited.
    pub fn pending_keys(&self) -> Vec<&SymbolKey> {
        let mut keys: Vec<(&usize, &SymbolKey)> = self
            .pending
            .iter()
            .map(|(key, queue)| (&queue.sequence, key))
            .collect();
        keys.sort_by_key(|(sequence, _)| **sequence);
        keys.into_iter().map(|(_, key)| key).collect()
    }

    pub fn is_waiting_for(&self, key: &SymbolKey) -> bool {
        self.pending.contains_key(key)
    }
}

impl fmt::Debug for ForwardReferenceBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardReferenceBroker")
            .field("pending_keys", &self.pending_keys())
            .field("pending_count", &self.pending_count())
            .finish()
    }
}
