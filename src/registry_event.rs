use crate::Identifier;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use capability_registry::{capability, Identifier, RegistryEvent};
///
/// trait Logger: Send + Sync {}
/// capability!(dyn Logger);
///
/// let event = RegistryEvent::Register {
///     identifier: Identifier::of::<dyn Logger>(),
///     accepted: true,
/// };
/// println!("{event}");
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// An instance was offered for a capability.
    Register {
        identifier: Identifier,
        /// `false` when the capability was already registered and the offer was ignored.
        accepted: bool,
    },

    /// An instance was requested from the registry.
    Get {
        identifier: Identifier,
        /// Whether the capability was registered
        found: bool,
    },

    /// A registration check was performed.
    Contains {
        identifier: Identifier,
        found: bool,
    },

    /// A deferred lookup was made.
    Deferred {
        identifier: Identifier,
        /// `true` when the callback ran at once, `false` when it was queued.
        immediate: bool,
    },

    /// The registry was reset.
    Reset {
        /// Number of registered services discarded
        services: usize,
        /// Number of queued callbacks discarded without running
        dropped_callbacks: usize,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                identifier,
                accepted,
            } => {
                write!(
                    f,
                    "register {{ capability: {}, accepted: {} }}",
                    identifier, accepted
                )
            }
            RegistryEvent::Get { identifier, found } => {
                write!(f, "get {{ capability: {}, found: {} }}", identifier, found)
            }
            RegistryEvent::Contains { identifier, found } => {
                write!(
                    f,
                    "contains {{ capability: {}, found: {} }}",
                    identifier, found
                )
            }
            RegistryEvent::Deferred {
                identifier,
                immediate,
            } => {
                write!(
                    f,
                    "deferred {{ capability: {}, immediate: {} }}",
                    identifier, immediate
                )
            }
            RegistryEvent::Reset {
                services,
                dropped_callbacks,
            } => write!(
                f,
                "Resetting the Registry ({} services, {} pending callbacks dropped)",
                services, dropped_callbacks
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability;

    trait Logger: Send + Sync {}
    capability!(dyn Logger);

    #[test]
    fn test_registry_event_display() {
        let identifier = Identifier::of::<dyn Logger>();
        let name = identifier.name();

        let event = RegistryEvent::Register {
            identifier,
            accepted: true,
        };
        assert_eq!(
            event.to_string(),
            format!("register {{ capability: {name}, accepted: true }}")
        );

        let event = RegistryEvent::Get {
            identifier,
            found: false,
        };
        assert_eq!(
            event.to_string(),
            format!("get {{ capability: {name}, found: false }}")
        );

        let event = RegistryEvent::Contains {
            identifier,
            found: true,
        };
        assert_eq!(
            event.to_string(),
            format!("contains {{ capability: {name}, found: true }}")
        );

        let event = RegistryEvent::Deferred {
            identifier,
            immediate: false,
        };
        assert_eq!(
            event.to_string(),
            format!("deferred {{ capability: {name}, immediate: false }}")
        );

        let event = RegistryEvent::Reset {
            services: 2,
            dropped_callbacks: 1,
        };
        assert_eq!(
            event.to_string(),
            "Resetting the Registry (2 services, 1 pending callbacks dropped)"
        );
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::Deferred {
            identifier: Identifier::of::<dyn Logger>(),
            immediate: true,
        };
        let cloned = event.clone();
        assert_eq!(format!("{:?}", event), format!("{:?}", cloned));
    }
}
