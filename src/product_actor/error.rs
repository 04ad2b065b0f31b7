use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Catalog unavailable: {0}")]
    Infrastructure(String),
}

impl From<FrameworkError<ProductError>> for ProductError {
    fn from(e: FrameworkError<ProductError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::Infrastructure(other.to_string()),
        }
    }
}
