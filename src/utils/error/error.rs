//! Error handling for the access core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the access core
pub type Result<T> = std::result::Result<T, AccessError>;

/// Main error type for the access core
///
/// Decision checks report a normal deny as `Ok(false)`, never as an
/// error. The variants here cover the two hard failures (missing tenant
/// context, cross-tenant access) and infrastructure problems.
#[derive(Error, Debug)]
pub enum AccessError {
    /// No tenant in the request context; aborts the request
    #[error("Tenant context missing")]
    TenantContextMissing,

    /// Cross-tenant resource access attempt, surfaced as a 403-equivalent
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Mutation conflicts with current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backing store failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccessError {
    /// Create an access-denied error
    pub fn access_denied<S: Into<String>>(message: S) -> Self {
        AccessError::AccessDenied(message.into())
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        AccessError::NotFound(message.into())
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        AccessError::Conflict(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AccessError::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        AccessError::Config(message.into())
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        AccessError::Storage(message.into())
    }

    /// Stable machine-readable code for clients and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::TenantContextMissing => "TENANT_CONTEXT_MISSING",
            AccessError::AccessDenied(_) => "ACCESS_DENIED",
            AccessError::NotFound(_) => "NOT_FOUND",
            AccessError::Conflict(_) => "CONFLICT",
            AccessError::Validation(_) => "VALIDATION_ERROR",
            AccessError::Config(_) => "CONFIG_ERROR",
            AccessError::Storage(_) => "STORAGE_ERROR",
            AccessError::Serialization(_) => "SERIALIZATION_ERROR",
            AccessError::Yaml(_) => "YAML_ERROR",
            AccessError::Io(_) => "IO_ERROR",
        }
    }
}
