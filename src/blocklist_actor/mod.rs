//! Blocklist store: pincodes that orders cannot be delivered to.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::{NaturalKeys, ResourceActor};
use crate::clients::BlocklistClient;
use crate::config::StoreConfig;
use crate::domain::BlockedPincode;

pub fn new(config: &StoreConfig) -> (ResourceActor<BlockedPincode>, BlocklistClient) {
    let (actor, generic_client) = ResourceActor::new(config.actor_buffer_size, NaturalKeys);
    let client = BlocklistClient::new(generic_client.with_timeout(config.request_timeout()));
    (actor, client)
}
