//! Storage layer errors

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Order not found
    #[error("Order not found: {id}")]
    NotFound {
        /// Order ID
        id: String,
    },

    /// Duplicate order (id already present)
    #[error("Duplicate order: {id}")]
    Duplicate {
        /// Order ID
        id: String,
    },

    /// Rejected backward status write
    #[error("Invalid transition: {message}")]
    InvalidTransition {
        /// Description of the rejected write
        message: String,
    },

    /// Domain error passthrough
    #[error("Domain error: {0}")]
    Domain(#[from] fxsim_domain::DomainError),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create a duplicate error
    pub fn duplicate(id: impl ToString) -> Self {
        Self::Duplicate { id: id.to_string() }
    }

    /// Whether this error means the order record is gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
