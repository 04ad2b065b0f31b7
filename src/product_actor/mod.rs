//! Catalog store: product records, stock reservation and review aggregates.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::{ResourceActor, SequentialIds};
use crate::clients::ProductClient;
use crate::config::StoreConfig;
use crate::domain::Product;

/// Creates the catalog actor and its client.
///
/// One actor serves every product, so requests for different products queue
/// behind each other. Each request is a short in-memory step, which keeps that
/// wait small; splitting the catalog per product would remove it entirely.
pub fn new(config: &StoreConfig) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) =
        ResourceActor::new(config.actor_buffer_size, SequentialIds::new("product"));
    let client = ProductClient::new(generic_client.with_timeout(config.request_timeout()));
    (actor, client)
}
