use thiserror::Error;

use crate::Identifier;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(
        "Service with identifier '{identifier}' not found. Make sure to call register() before attempting to retrieve the service using get()"
    )]
    ServiceNotFound { identifier: Identifier },

    #[error("Type mismatch in registry for capability '{identifier}'")]
    TypeMismatch { identifier: Identifier },
}

impl RegistryError {
    /// The capability the failed operation was about.
    pub fn identifier(&self) -> Identifier {
        match self {
            RegistryError::ServiceNotFound { identifier }
            | RegistryError::TypeMismatch { identifier } => *identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability;

    trait Clock: Send + Sync {}
    trait Logger: Send + Sync {}
    capability!(dyn Clock, dyn Logger);

    #[test]
    fn test_service_not_found_display() {
        let identifier = Identifier::of::<dyn Clock>();
        let err = RegistryError::ServiceNotFound { identifier };
        assert_eq!(
            err.to_string(),
            format!(
                "Service with identifier '{}' not found. Make sure to call register() before attempting to retrieve the service using get()",
                identifier.name()
            )
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let identifier = Identifier::of::<dyn Clock>();
        let err = RegistryError::TypeMismatch { identifier };
        assert_eq!(
            err.to_string(),
            format!("Type mismatch in registry for capability '{}'", identifier.name())
        );
    }

    #[test]
    fn test_identifier_accessor() {
        let identifier = Identifier::of::<dyn Logger>();
        assert_eq!(
            RegistryError::ServiceNotFound { identifier }.identifier(),
            identifier
        );
    }

    #[test]
    fn test_equality() {
        let clock = Identifier::of::<dyn Clock>();
        let logger = Identifier::of::<dyn Logger>();
        assert_eq!(
            RegistryError::ServiceNotFound { identifier: clock },
            RegistryError::ServiceNotFound { identifier: clock }
        );
        assert_ne!(
            RegistryError::ServiceNotFound { identifier: clock },
            RegistryError::ServiceNotFound { identifier: logger }
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &RegistryError::ServiceNotFound {
            identifier: Identifier::of::<dyn Logger>(),
        };
        assert!(err.to_string().starts_with("Service with identifier"));
    }
}
