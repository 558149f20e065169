//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations of the
//! registration protocol: `register`, `get`, `require`, `get_after_register` and `reset`.
//!
//! The registry is capability-based: each interface type (`dyn Trait`) can have exactly
//! one instance stored. The first registration wins; later ones are ignored.

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::store::{Deferral, PendingCallback, Store};
use crate::{Capability, Identifier, RegistryError, RegistryEvent};

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// the `store` accessor to be implemented by the implementor.
pub trait RegistryApi {
    /// Access the backing store.
    fn store(&self) -> &Store;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked for every registry operation. It is not called while
    /// any registry lock is held, so it may use the registry itself.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.store().set_trace(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Note: This does not affect registered services, only the tracing callback.
    fn clear_trace_callback(&self) {
        self.store().clear_trace();
    }

    /// Convenience wrapper to emit a registry event using the current callback.
    fn emit_event(&self, event: &RegistryEvent) {
        self.store().emit(event);
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Register `instance` as the implementation of capability `T`.
    ///
    /// If `T` is already registered this is a silent no-op: the first registration
    /// wins. Otherwise the instance is stored and every callback queued by
    /// [`get_after_register`](RegistryApi::get_after_register) for `T` runs once, in
    /// the order they were queued, before this method returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use capability_registry::{capability, Registry, RegistryApi};
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync {
    ///     fn greet(&self) -> String;
    /// }
    /// capability!(dyn Greeter);
    ///
    /// struct English;
    /// impl Greeter for English {
    ///     fn greet(&self) -> String {
    ///         "hello".into()
    ///     }
    /// }
    ///
    /// let registry = Registry::new();
    /// registry.register::<dyn Greeter>(Arc::new(English));
    /// assert_eq!(registry.require::<dyn Greeter>().greet(), "hello");
    /// ```
    fn register<T: Capability + ?Sized>(&self, instance: Arc<T>) {
        let identifier = Identifier::of::<T>();
        let erased: Arc<dyn Any + Send + Sync> = Arc::new(Arc::clone(&instance));

        let Some(callbacks) = self.store().register_if_absent(identifier, erased) else {
            debug!(%identifier, "capability already registered, keeping the first instance");
            self.emit_event(&RegistryEvent::Register {
                identifier,
                accepted: false,
            });
            return;
        };

        debug!(%identifier, callbacks = callbacks.len(), "registered capability");
        self.emit_event(&RegistryEvent::Register {
            identifier,
            accepted: true,
        });

        let shared: &(dyn Any + Send + Sync) = &instance;
        for callback in callbacks {
            callback(shared);
        }
    }

    /// Retrieve the instance registered for capability `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::ServiceNotFound`] if `T` has not been registered
    /// - [`RegistryError::TypeMismatch`] if the stored instance is not an `Arc<T>`
    fn get<T: Capability + ?Sized>(&self) -> Result<Arc<T>, RegistryError> {
        let identifier = Identifier::of::<T>();

        let result = match self.store().get_service(&identifier) {
            Some(instance) => instance
                .downcast_ref::<Arc<T>>()
                .cloned()
                .ok_or(RegistryError::TypeMismatch { identifier }),
            None => Err(RegistryError::ServiceNotFound { identifier }),
        };

        trace!(%identifier, found = result.is_ok(), "capability lookup");
        self.emit_event(&RegistryEvent::Get {
            identifier,
            found: result.is_ok(),
        });

        result
    }

    /// Retrieve the instance registered for capability `T`, treating absence as fatal.
    ///
    /// # Panics
    ///
    /// Panics on every call made before `T` is registered. A missing capability at
    /// this point is a wiring bug: the consumer ran before its producer.
    fn require<T: Capability + ?Sized>(&self) -> Arc<T> {
        match self.get::<T>() {
            Ok(instance) => instance,
            Err(err) => {
                error!(identifier = %err.identifier(), "required capability is not registered");
                panic!("{err}");
            }
        }
    }

    /// Run `callback` with the instance of capability `T` once it is available.
    ///
    /// If `T` is already registered the callback runs immediately, before this method
    /// returns. Otherwise it is queued and runs exactly once inside the matching
    /// [`register`](RegistryApi::register) call. Queued callbacks cannot be cancelled;
    /// [`reset`](RegistryApi::reset) drops them without running them.
    fn get_after_register<T, F>(&self, callback: F)
    where
        T: Capability + ?Sized,
        F: FnOnce(Arc<T>) + Send + 'static,
    {
        let identifier = Identifier::of::<T>();

        let pending: PendingCallback = Box::new(move |instance: &(dyn Any + Send + Sync)| {
            match instance.downcast_ref::<Arc<T>>() {
                Some(service) => callback(Arc::clone(service)),
                None => error!(%identifier, "queued callback received an instance of another type"),
            }
        });

        match self.store().defer(identifier, pending) {
            Deferral::Ready(instance, pending) => {
                trace!(%identifier, "capability already registered, running callback");
                self.emit_event(&RegistryEvent::Deferred {
                    identifier,
                    immediate: true,
                });
                pending(&*instance);
            }
            Deferral::Queued { position } => {
                trace!(%identifier, position, "queued callback until registration");
                self.emit_event(&RegistryEvent::Deferred {
                    identifier,
                    immediate: false,
                });
            }
        }
    }

    /// Check if capability `T` is registered.
    fn contains<T: Capability + ?Sized>(&self) -> bool {
        let identifier = Identifier::of::<T>();
        let found = self.store().contains(&identifier);

        self.emit_event(&RegistryEvent::Contains { identifier, found });

        found
    }

    /// Number of callbacks waiting for capability `T` to be registered.
    fn pending_callbacks<T: Capability + ?Sized>(&self) -> usize {
        self.store().pending_len(&Identifier::of::<T>())
    }

    /// Discard every registration and every queued callback.
    ///
    /// Primarily intended for isolating tests. Already-retrieved `Arc<T>` handles
    /// remain valid, and the tracing callback is kept. Calling this while other
    /// threads are registering gives no ordering guarantee beyond the swap itself.
    fn reset(&self) {
        let discarded = self.store().reset();

        debug!(
            services = discarded.services,
            dropped_callbacks = discarded.callbacks,
            "registry reset"
        );
        self.emit_event(&RegistryEvent::Reset {
            services: discarded.services,
            dropped_callbacks: discarded.callbacks,
        });
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
