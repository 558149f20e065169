//! Macros for creating named, isolated registries.

/// Creates a complete static registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily created [`Registry`](crate::Registry) static (hidden)
/// - Free functions delegating to it: `register`, `get`, `require`,
///   `get_after_register`, `contains`, `pending_callbacks`, `reset`,
///   `set_trace_callback`, `clear_trace_callback`
/// - `registry()`, returning the underlying `&'static Registry`
///
/// # Examples
///
/// ```rust
/// use capability_registry::{capability, define_registry};
/// use std::sync::Arc;
///
/// trait Storage: Send + Sync {
///     fn url(&self) -> &str;
/// }
/// capability!(dyn Storage);
///
/// struct Postgres;
/// impl Storage for Postgres {
///     fn url(&self) -> &str {
///         "postgresql://localhost"
///     }
/// }
///
/// define_registry!(services);
///
/// services::register::<dyn Storage>(Arc::new(Postgres));
/// assert_eq!(services::require::<dyn Storage>().url(), "postgresql://localhost");
/// ```
///
/// # Multiple Registries
///
/// Each invocation creates an independent registry:
///
/// ```rust
/// use capability_registry::{capability, define_registry};
/// use std::sync::Arc;
///
/// trait Storage: Send + Sync {}
/// capability!(dyn Storage);
/// struct Memory;
/// impl Storage for Memory {}
///
/// define_registry!(primary);
/// define_registry!(fallback);
///
/// primary::register::<dyn Storage>(Arc::new(Memory));
///
/// assert!(primary::contains::<dyn Storage>());
/// assert!(!fallback::contains::<dyn Storage>());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // Storage for the registry (module-private)
            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// The underlying registry, for trait-based access.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Register the instance for capability `T`. The first registration wins.
            pub fn register<T: $crate::Capability + ?Sized>(instance: Arc<T>) {
                use $crate::RegistryApi;
                REGISTRY.register(instance)
            }

            /// Retrieve the instance for capability `T`.
            pub fn get<T: $crate::Capability + ?Sized>() -> Result<Arc<T>, $crate::RegistryError> {
                use $crate::RegistryApi;
                REGISTRY.get()
            }

            /// Retrieve the instance for capability `T`, panicking if it is missing.
            pub fn require<T: $crate::Capability + ?Sized>() -> Arc<T> {
                use $crate::RegistryApi;
                REGISTRY.require()
            }

            /// Run `callback` once capability `T` is registered.
            pub fn get_after_register<T, F>(callback: F)
            where
                T: $crate::Capability + ?Sized,
                F: FnOnce(Arc<T>) + Send + 'static,
            {
                use $crate::RegistryApi;
                REGISTRY.get_after_register::<T, F>(callback)
            }

            /// Check if capability `T` is registered.
            pub fn contains<T: $crate::Capability + ?Sized>() -> bool {
                use $crate::RegistryApi;
                REGISTRY.contains::<T>()
            }

            /// Number of callbacks waiting for capability `T`.
            pub fn pending_callbacks<T: $crate::Capability + ?Sized>() -> usize {
                use $crate::RegistryApi;
                REGISTRY.pending_callbacks::<T>()
            }

            /// Discard every registration and queued callback.
            pub fn reset() {
                use $crate::RegistryApi;
                REGISTRY.reset()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                use $crate::RegistryApi;
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
