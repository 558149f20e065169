//! Capability identifiers.
//!
//! A capability is an abstract interface, expressed as a trait-object type such as
//! `dyn Logger`. Every capability resolves to exactly one [`Identifier`], derived from
//! its `TypeId` at compile time, so two distinct traits can never collide even when
//! the same concrete type implements both.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker for types that can be used as registry keys.
///
/// Implement it for trait-object types only, usually through the [`capability!`]
/// macro. Types that do not implement `Capability` cannot be registered at all:
///
/// ```compile_fail
/// use capability_registry::{Registry, RegistryApi};
/// use std::sync::Arc;
///
/// struct Plain;
///
/// let registry = Registry::new();
/// registry.register::<Plain>(Arc::new(Plain));
/// ```
pub trait Capability: Send + Sync + 'static {}

/// Declares one or more trait-object types as capabilities.
///
/// ```rust
/// use capability_registry::capability;
///
/// trait Logger: Send + Sync {}
/// trait Clock: Send + Sync {}
///
/// capability!(dyn Logger, dyn Clock);
/// ```
#[macro_export]
macro_rules! capability {
    ($($cap:ty),+ $(,)?) => {
        $(impl $crate::Capability for $cap {})+
    };
}

/// Stable identifier of a capability.
///
/// Equality and hashing use the `TypeId` only; the name is kept for logs and errors.
#[derive(Clone, Copy)]
pub struct Identifier {
    type_id: TypeId,
    name: &'static str,
}

impl Identifier {
    /// Resolves the identifier of capability `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is a sized, concrete type. Registry keys must be interfaces
    /// (`dyn Trait`), so a concrete type declared as a capability is a programming error.
    pub fn of<T: Capability + ?Sized>() -> Self {
        let name = std::any::type_name::<T>();

        // Trait objects are referenced through fat pointers; concrete types are not.
        if std::mem::size_of::<&T>() == std::mem::size_of::<usize>() {
            tracing::error!(capability = name, "concrete type used as a capability");
            panic!(
                "Capability must be an interface such as `dyn Trait`, not the concrete type '{name}'"
            );
        }

        Self {
            type_id: TypeId::of::<T>(),
            name,
        }
    }

    /// Fully qualified name of the capability type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identifier").field(&self.name).finish()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    trait Logger: Send + Sync {}
    trait Notifier: Send + Sync {}

    capability!(dyn Logger, dyn Notifier);

    struct Concrete;
    impl Capability for Concrete {}

    #[test]
    fn test_same_capability_same_identifier() {
        assert_eq!(Identifier::of::<dyn Logger>(), Identifier::of::<dyn Logger>());
    }

    #[test]
    fn test_distinct_capabilities_distinct_identifiers() {
        assert_ne!(
            Identifier::of::<dyn Logger>(),
            Identifier::of::<dyn Notifier>()
        );

        let set: HashSet<Identifier> = [
            Identifier::of::<dyn Logger>(),
            Identifier::of::<dyn Notifier>(),
            Identifier::of::<dyn Logger>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_name_contains_path_and_trait() {
        let id = Identifier::of::<dyn Logger>();
        assert!(id.name().contains("identifier::tests::Logger"));
        assert_eq!(id.to_string(), id.name());
        assert_eq!(format!("{id:?}"), format!("Identifier({:?})", id.name()));
    }

    #[test]
    fn test_type_id_matches() {
        assert_eq!(
            Identifier::of::<dyn Logger>().type_id(),
            TypeId::of::<dyn Logger>()
        );
    }

    #[test]
    #[should_panic(expected = "not the concrete type")]
    fn test_concrete_type_is_fatal() {
        let _ = Identifier::of::<Concrete>();
    }
}
