//! # Capability Registry
//!
//! A thread-safe, type-keyed service registry for wiring independent components
//! together regardless of the order in which they initialise.
//!
//! A component that provides a capability registers an implementation under the
//! capability's interface type (`dyn Trait`). Components that need it either fetch it
//! directly, or ask to be called back once it is registered.
//!
//! ## Quick Start
//!
//! ```rust
//! use capability_registry::{capability, Registry, RegistryApi};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//! capability!(dyn Logger);
//!
//! struct Console;
//! impl Logger for Console {
//!     fn log(&self, message: &str) -> String {
//!         format!("[console] {message}")
//!     }
//! }
//!
//! let registry = Registry::new();
//!
//! // A consumer that may run before the producer.
//! registry.get_after_register::<dyn Logger, _>(|logger| {
//!     assert_eq!(logger.log("ready"), "[console] ready");
//! });
//!
//! // The producer. The first registration wins; later ones are ignored.
//! registry.register::<dyn Logger>(Arc::new(Console));
//!
//! let logger = registry.require::<dyn Logger>();
//! assert_eq!(logger.log("hi"), "[console] hi");
//! ```
//!
//! ## Main Operations
//!
//! All operations are provided by [`RegistryApi`]:
//!
//! - [`register`](RegistryApi::register) - Register the instance for a capability (first wins)
//! - [`get`](RegistryApi::get) - Retrieve an instance, or a [`RegistryError`]
//! - [`require`](RegistryApi::require) - Retrieve an instance, panicking if it is missing
//! - [`get_after_register`](RegistryApi::get_after_register) - Run a callback once the capability is registered
//! - [`reset`](RegistryApi::reset) - Discard all registrations and queued callbacks
//! - [`set_trace_callback`](RegistryApi::set_trace_callback) - Observe registry operations
//!
//! Registries come from [`Registry::new`], the process-wide [`global`] registry, or
//! the [`define_registry!`] macro.

mod identifier;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
pub mod store;

pub use identifier::{Capability, Identifier};
pub use registry::{global, Registry};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::RegistryApi;
pub use store::{Store, TraceCallback};
