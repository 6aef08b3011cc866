use thiserror::Error;

use crate::forms::orders::OrderFormError;
use crate::repository::RepositoryError;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to its callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input rejected before the store is touched.
    #[error("validation failed: {0}")]
    Validation(String),
    /// An ordered product does not exist.
    #[error("Product {0} not found")]
    ProductNotFound(i32),
    /// An ordered product does not have enough units in stock.
    #[error("Insufficient stock for {product_name}")]
    InsufficientStock {
        product_id: i32,
        product_name: String,
    },
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,
    /// The store rejected a write it should have accepted.
    #[error("internal error: {0}")]
    Internal(String),
    /// The store could not be reached or the transaction failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    /// Whether repeating the same call may succeed without any other change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::ConstraintViolation(message) => Self::Internal(message),
            other @ (RepositoryError::DatabaseError(_) | RepositoryError::ConnectionError(_)) => {
                Self::StoreUnavailable(other.to_string())
            }
        }
    }
}

impl From<OrderFormError> for ServiceError {
    fn from(value: OrderFormError) -> Self {
        Self::Validation(value.to_string())
    }
}
