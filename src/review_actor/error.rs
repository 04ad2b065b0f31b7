use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::product_actor::ProductError;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("Review validation error: {0}")]
    ValidationError(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Review not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Infrastructure(String),
}

impl ReviewError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReviewError::Infrastructure(_))
    }
}

impl From<FrameworkError<ReviewError>> for ReviewError {
    fn from(e: FrameworkError<ReviewError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => ReviewError::NotFound(id),
            other => ReviewError::Infrastructure(other.to_string()),
        }
    }
}

impl From<ProductError> for ReviewError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => ReviewError::ProductNotFound(id),
            ProductError::Infrastructure(msg) => ReviewError::Infrastructure(msg),
            other => ReviewError::ValidationError(other.to_string()),
        }
    }
}
