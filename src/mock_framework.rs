//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then the
//! `expect_*` helpers to assert each request the client sends and to answer it.
//! Nothing is answered unless the test does so, which lets a test stop a flow
//! at any step or inject store failures.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, Filter, FrameworkError, ResourceClient, ResourceRequest, Snapshot};

pub type Responder<R, E> = oneshot::Sender<Result<R, FrameworkError<E>>>;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Responder<Snapshot<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<(), T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockPincode, BlockedPincode};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<BlockedPincode>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(BlockPincode { pincode: "110001".into(), reason: None })
                .await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.pincode, "110001");
        responder.send(Err(FrameworkError::AlreadyExists("110001".into()))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Err(FrameworkError::AlreadyExists("110001".into())));
    }
}
