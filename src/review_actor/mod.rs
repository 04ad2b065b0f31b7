//! Review store: append-only product reviews.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::{ResourceActor, ResourceClient, SequentialIds};
use crate::config::StoreConfig;
use crate::domain::Review;

pub fn new(config: &StoreConfig) -> (ResourceActor<Review>, ResourceClient<Review>) {
    let (actor, client) = ResourceActor::new(config.actor_buffer_size, SequentialIds::new("review"));
    (actor, client.with_timeout(config.request_timeout()))
}
