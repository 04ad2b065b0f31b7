//! # Storefront core
//!
//! Order placement, inventory consistency and review aggregation for a small
//! storefront, built as a set of store actors.
//!
//! - **Stores** - one [`actor_framework::ResourceActor`] per record type:
//!   catalog ([`product_actor`]), order ledger ([`order_actor`]),
//!   reviews ([`review_actor`]) and the pincode blocklist ([`blocklist_actor`]).
//! - **Clients** - typed handles in [`clients`]; [`clients::OrderClient`] and
//!   [`clients::ReviewClient`] coordinate several stores.
//! - **System** - [`app_system::StoreSystem`] starts and stops everything.
//!
//! Every store handles one request at a time, so a stock decrement or an
//! aggregate write is a single indivisible step for its product.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use storefront::app_system::StoreSystem;
//! use storefront::config::StoreConfig;
//!
//! let system = StoreSystem::new(StoreConfig::from_env());
//! let order = system.order_client.track("CC-20250101-042").await?;
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod blocklist_actor;
pub mod clients;
pub mod config;
pub mod domain;
pub mod order_actor;
pub mod product_actor;
pub mod review_actor;

#[cfg(test)]
mod mock_framework;
