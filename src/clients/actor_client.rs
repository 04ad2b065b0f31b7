//! Shared read operations for typed clients.
use async_trait::async_trait;

use crate::actor_framework::{Entity, FrameworkError, ResourceClient};

/// Implemented by every typed client wrapping a [`ResourceClient`].
#[async_trait]
pub trait ActorClient<T: Entity>: Send + Sync {
    type Error: Send;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError<T::Error>) -> Self::Error;

    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().query(|_| true).await.map_err(Self::map_error)
    }
}
