//! Typed handles over the store actors.
//!
//! `ProductClient` and `BlocklistClient` are thin wrappers. `OrderClient` and
//! `ReviewClient` orchestrate several stores: order placement and the review
//! aggregate live there.

pub mod actor_client;
pub mod blocklist_client;
pub mod order_client;
pub mod product_client;
pub mod review_client;

pub use actor_client::ActorClient;
pub use blocklist_client::BlocklistClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use review_client::ReviewClient;
