use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BlocklistError {
    #[error("Pincode already blocked: {0}")]
    AlreadyBlocked(String),
    #[error("Pincode not blocked: {0}")]
    NotBlocked(String),
    #[error("Blocklist validation error: {0}")]
    ValidationError(String),
    #[error("Blocklist unavailable: {0}")]
    Infrastructure(String),
}

impl From<FrameworkError<BlocklistError>> for BlocklistError {
    fn from(e: FrameworkError<BlocklistError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::AlreadyExists(pincode) => BlocklistError::AlreadyBlocked(pincode),
            FrameworkError::NotFound(pincode) => BlocklistError::NotBlocked(pincode),
            other => BlocklistError::Infrastructure(other.to_string()),
        }
    }
}
