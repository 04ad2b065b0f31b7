use std::time::Duration;
use thiserror::Error;

/// Failures of the system lifecycle itself, as opposed to a single request.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(String),
    #[error("Actors did not stop within {0:?}")]
    ShutdownTimedOut(Duration),
}
