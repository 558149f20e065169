//! Lock-guarded storage behind every registry.
//!
//! A [`Store`] holds two maps behind a single mutex: registered services and the
//! callbacks still waiting for a service. Values are type-erased here; the typed
//! protocol lives in [`RegistryApi`](crate::RegistryApi).
//!
//! No callback is ever invoked while the lock is held. The compound operations
//! [`Store::register_if_absent`] and [`Store::defer`] hand callbacks back to the
//! caller, which runs them after the lock is released.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Identifier, RegistryEvent};

/// A registered instance. For capability `T` the erased value is an `Arc<T>`.
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// A type-erased callback waiting for an instance.
///
/// It receives a reference to the erased `Arc<T>` and is consumed by the call.
pub type PendingCallback = Box<dyn FnOnce(&(dyn Any + Send + Sync)) + Send>;

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

#[derive(Default)]
struct State {
    services: HashMap<Identifier, AnyInstance>,
    pending: HashMap<Identifier, Vec<PendingCallback>>,
}

/// Outcome of [`Store::defer`].
pub enum Deferral {
    /// The service is already registered; the caller runs the callback.
    Ready(AnyInstance, PendingCallback),
    /// The callback was queued. `position` is its zero-based index in the queue.
    Queued { position: usize },
}

/// What [`Store::reset`] threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discarded {
    pub services: usize,
    pub callbacks: usize,
}

pub struct Store {
    state: Mutex<State>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            trace: Mutex::new(None),
        }
    }

    // Poisoning can only come from a panic inside one of the short critical
    // sections below; the maps stay consistent, so keep using them.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------------------------------
    // Primitive operations
    // -------------------------------------------------------------------------------------------------

    /// Returns the instance registered under `identifier`, if any.
    pub fn get_service(&self, identifier: &Identifier) -> Option<AnyInstance> {
        self.state().services.get(identifier).cloned()
    }

    /// Stores `instance` under `identifier`, replacing any previous one.
    ///
    /// First-registration-wins is enforced by [`Store::register_if_absent`], not here.
    pub fn set_service(&self, identifier: Identifier, instance: AnyInstance) {
        self.state().services.insert(identifier, instance);
    }

    /// Removes and returns the callbacks queued for `identifier`, in insertion order.
    ///
    /// Returns an empty list when nothing is queued.
    pub fn take_callbacks(&self, identifier: &Identifier) -> Vec<PendingCallback> {
        self.state().pending.remove(identifier).unwrap_or_default()
    }

    /// Appends `callback` to the queue for `identifier`.
    pub fn append_callback(&self, identifier: Identifier, callback: PendingCallback) {
        self.state()
            .pending
            .entry(identifier)
            .or_default()
            .push(callback);
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.state().services.contains_key(identifier)
    }

    /// Number of callbacks queued for `identifier`.
    pub fn pending_len(&self, identifier: &Identifier) -> usize {
        self.state().pending.get(identifier).map_or(0, Vec::len)
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.state().services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------------------------------
    // Compound operations
    // -------------------------------------------------------------------------------------------------

    /// Stores `instance` unless `identifier` is already registered.
    ///
    /// Returns `None` if a service was already present. Otherwise the instance is
    /// stored and the queued callbacks are removed in the same critical section and
    /// returned for the caller to run.
    pub fn register_if_absent(
        &self,
        identifier: Identifier,
        instance: AnyInstance,
    ) -> Option<Vec<PendingCallback>> {
        let mut state = self.state();
        if state.services.contains_key(&identifier) {
            return None;
        }

        state.services.insert(identifier, instance);
        Some(state.pending.remove(&identifier).unwrap_or_default())
    }

    /// Looks `identifier` up and queues `callback` if it is not registered yet.
    pub fn defer(&self, identifier: Identifier, callback: PendingCallback) -> Deferral {
        let mut state = self.state();
        if let Some(instance) = state.services.get(&identifier) {
            return Deferral::Ready(Arc::clone(instance), callback);
        }

        let queue = state.pending.entry(identifier).or_default();
        queue.push(callback);
        Deferral::Queued {
            position: queue.len() - 1,
        }
    }

    /// Replaces both maps with empty ones.
    ///
    /// Dropped callbacks are never invoked. The old contents are dropped after the
    /// lock is released, so destructors may use the store.
    pub fn reset(&self) -> Discarded {
        let old = std::mem::take(&mut *self.state());

        Discarded {
            services: old.services.len(),
            callbacks: old.pending.values().map(Vec::len).sum(),
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    pub fn set_trace(&self, callback: Arc<TraceCallback>) {
        *self.trace.lock().unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    pub fn clear_trace(&self) {
        *self.trace.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Invokes the trace callback, if one is set.
    ///
    /// The callback is cloned out of its slot first, so it may use the registry.
    pub fn emit(&self, event: &RegistryEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Store")
            .field("services", &state.services.keys().collect::<Vec<_>>())
            .field(
                "pending",
                &state
                    .pending
                    .iter()
                    .map(|(id, queue)| (id, queue.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
