use thiserror::Error;

/// Domain-specific errors for directory management operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("UMA resource not found: {id}")]
    ResourceNotFound { id: String },

    #[error("UMA scope not found: {inum}")]
    ScopeNotFound { inum: String },

    #[error("Client not found: {inum}")]
    ClientNotFound { inum: String },

    #[error("Directory entry not found: {dn}")]
    ReferenceNotFound { dn: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Authorization failed: {subject} lacks permission {permission}")]
    AuthorizationFailed { subject: String, permission: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DomainError {
    /// True for every "no matching record" variant
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::ResourceNotFound { .. }
                | DomainError::ScopeNotFound { .. }
                | DomainError::ClientNotFound { .. }
                | DomainError::ReferenceNotFound { .. }
        )
    }

    pub fn validation(field: &str, message: &str) -> Self {
        DomainError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Authorization-specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UnknownAction { action } => DomainError::AuthorizationFailed {
                subject: "unknown".to_string(),
                permission: action,
            },
        }
    }
}

/// Repository-specific errors raised by directory adapters
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Entry already exists: {dn}")]
    EntryAlreadyExists { dn: String },

    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EntryAlreadyExists { dn } => DomainError::AlreadyExists {
                entity_type: "Directory entry".to_string(),
                identifier: dn,
            },
            RepositoryError::SerializationFailed { message } => {
                DomainError::Serialization { message }
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file error: {message}")]
    FileError { message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
            ConfigError::FileError { message } => DomainError::Configuration { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_are_classified() {
        assert!(DomainError::ResourceNotFound { id: "r1".into() }.is_not_found());
        assert!(DomainError::ScopeNotFound { inum: "s1".into() }.is_not_found());
        assert!(DomainError::ClientNotFound { inum: "c1".into() }.is_not_found());
        assert!(!DomainError::validation("id", "blank").is_not_found());
    }

    #[test]
    fn duplicate_entry_becomes_already_exists() {
        let err: DomainError = RepositoryError::EntryAlreadyExists {
            dn: "oxId=r1,ou=resources,ou=uma,o=gluu".into(),
        }
        .into();
        assert!(matches!(err, DomainError::AlreadyExists { .. }));
    }
}
