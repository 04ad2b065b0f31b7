use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::blocklist_actor::BlocklistError;
use crate::domain::OrderStatus;
use crate::product_actor::ProductError;

/// Errors that can occur while placing, advancing or looking up orders.
///
/// Every variant except `Infrastructure` is a final answer for the call and is
/// returned unchanged to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Delivery not available for pincode {0}")]
    DeliveryUnavailable(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Order id space exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Infrastructure(String),
}

impl OrderError {
    /// Only storage outages are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Infrastructure(_))
    }
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(e: FrameworkError<OrderError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::IdExhausted { attempts } => OrderError::GenerationExhausted { attempts },
            FrameworkError::AlreadyExists(id) => {
                OrderError::ValidationError(format!("order {id} already exists"))
            }
            other => OrderError::Infrastructure(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::InsufficientStock { requested, available } => {
                OrderError::InsufficientStock { requested, available }
            }
            ProductError::InvalidQuantity(q) => {
                OrderError::ValidationError(format!("quantity must be positive, got {q}"))
            }
            ProductError::ValidationError(msg) => OrderError::ValidationError(msg),
            ProductError::Infrastructure(msg) => OrderError::Infrastructure(msg),
        }
    }
}

impl From<BlocklistError> for OrderError {
    fn from(e: BlocklistError) -> Self {
        match e {
            BlocklistError::Infrastructure(msg) => OrderError::Infrastructure(msg),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}
