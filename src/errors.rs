use thiserror::Error;

/// Error taxonomy for the storefront core.
///
/// Catalog unavailability never surfaces through this type; the catalog
/// client recovers locally with its fallback option set. Payment
/// verification failures are distinct from order-creation failures:
/// money may already have moved, so callers must not clear the cart.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Order creation failed: {0}")]
    OrderCreationFailed(String),

    #[error("Payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        StorefrontError::ExternalService(err.to_string())
    }
}

impl StorefrontError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StorefrontError::NotFound(what.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        StorefrontError::InvalidOperation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        StorefrontError::Storage(msg.into())
    }

    /// Field names that failed validation, for per-field reporting.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            StorefrontError::Validation(errors) => {
                errors.field_errors().keys().copied().collect()
            }
            _ => Vec::new(),
        }
    }
}
