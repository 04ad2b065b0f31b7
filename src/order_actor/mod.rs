//! Order ledger: order records, id minting and the status lifecycle.

mod actions;
pub mod entity;
pub mod error;
pub mod order_id;

pub use actions::*;
pub use error::*;
pub use order_id::OrderIdGenerator;

use crate::actor_framework::{ResourceActor, ResourceClient};
use crate::config::StoreConfig;
use crate::domain::Order;

/// Creates the ledger actor and the raw client the order client wraps.
pub fn new(config: &StoreConfig) -> (ResourceActor<Order>, ResourceClient<Order>) {
    let (actor, client) =
        ResourceActor::new(config.actor_buffer_size, OrderIdGenerator::from_config(config));
    (actor, client.with_timeout(config.request_timeout()))
}
