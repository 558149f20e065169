//! Owned registry values and the process-wide default registry.
//!
//! [`Registry`] is the explicit form: construct one, hand references to the components
//! that need it, and drop it when done. [`global`] returns a lazily created registry
//! that lives for the whole process.
//!
//! # Examples
//!
//! ```
//! use capability_registry::{capability, Registry, RegistryApi};
//! use std::sync::{Arc, Mutex};
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//! capability!(dyn Clock);
//!
//! struct Fixed(u64);
//! impl Clock for Fixed {
//!     fn now(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! let registry = Registry::new();
//! let seen = Arc::new(Mutex::new(None));
//!
//! // The consumer initialises first and asks to be told when a clock arrives.
//! let slot = seen.clone();
//! registry.get_after_register::<dyn Clock, _>(move |clock| {
//!     *slot.lock().unwrap() = Some(clock.now());
//! });
//!
//! // The producer registers later; the callback runs inside this call.
//! registry.register::<dyn Clock>(Arc::new(Fixed(42)));
//! assert_eq!(*seen.lock().unwrap(), Some(42));
//! ```

use std::fmt;
use std::sync::LazyLock;

use crate::store::Store;
use crate::RegistryApi;

/// The process-wide registry returned by [`global`].
static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A thread-safe, capability-keyed service registry.
///
/// All operations come from [`RegistryApi`].
#[derive(Default)]
pub struct Registry {
    store: Store,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl RegistryApi for Registry {
    fn store(&self) -> &Store {
        &self.store
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store)
            .finish()
    }
}

/// Returns the process-wide registry.
///
/// It is created on first access and is never dropped; use
/// [`RegistryApi::reset`] to clear it between tests.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
