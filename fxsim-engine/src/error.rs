//! Engine error types.

use fxsim_domain::{DomainError, OrderId};
use fxsim_store::StoreError;
use thiserror::Error;

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Submission rejected by input validation
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the rejected field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Unknown order id
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Tie a domain validation failure to the input field it came from.
    pub fn invalid_input(field: &'static str, error: DomainError) -> Self {
        Self::InvalidInput {
            field,
            reason: match error {
                DomainError::InvalidSymbol(reason) => reason,
                DomainError::InvalidQuantity(reason) => reason,
                other => other.to_string(),
            },
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
