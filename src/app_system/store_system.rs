use std::time::Duration;
use tracing::{error, info, warn};

use crate::app_system::SystemError;
use crate::clients::{BlocklistClient, OrderClient, ProductClient, ReviewClient};
use crate::config::StoreConfig;
use crate::{blocklist_actor, order_actor, product_actor, review_actor};

/// The storefront core: starts every store actor and hands out their clients.
///
/// Actors live until the last client clone is dropped; [`StoreSystem::shutdown`]
/// drops the system's own clients and waits for the actors to drain.
pub struct StoreSystem {
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    pub product_client: ProductClient,
    pub blocklist_client: BlocklistClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
    shutdown_timeout: Duration,
}

impl StoreSystem {
    /// Must be called from within a tokio runtime.
    pub fn new(config: StoreConfig) -> Self {
        info!(order_id_prefix = %config.order_id_prefix, "Starting store system");

        // 1. Leaf stores
        let (blocklist_actor, blocklist_client) = blocklist_actor::new(&config);
        let blocklist_handle = tokio::spawn(blocklist_actor.run());

        let (product_actor, product_client) = product_actor::new(&config);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Ledger and reviews, which orchestrate over the leaves
        let (order_actor, order_resource_client) = order_actor::new(&config);
        let order_client = OrderClient::new(
            order_resource_client,
            blocklist_client.clone(),
            product_client.clone(),
            config.order_id_prefix.clone(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        let (review_actor, review_resource_client) = review_actor::new(&config);
        let review_client = ReviewClient::new(review_resource_client, product_client.clone());
        let review_handle = tokio::spawn(review_actor.run());

        Self {
            order_client,
            review_client,
            product_client,
            blocklist_client,
            handles: vec![blocklist_handle, product_handle, order_handle, review_handle],
            shutdown_timeout: config.shutdown_timeout(),
        }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            order_client,
            review_client,
            product_client,
            blocklist_client,
            handles,
            shutdown_timeout,
        } = self;

        // Actors stop once every sender is gone
        drop(order_client);
        drop(review_client);
        drop(product_client);
        drop(blocklist_client);

        let aborts: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();
        let drain = async {
            for handle in handles {
                if let Err(e) = handle.await {
                    error!("Actor task failed: {:?}", e);
                    return Err(SystemError::ActorTaskFailed(e.to_string()));
                }
            }
            Ok(())
        };

        match tokio::time::timeout(shutdown_timeout, drain).await {
            Ok(result) => {
                result?;
                info!("System shutdown complete.");
                Ok(())
            }
            Err(_) => {
                warn!(timeout_ms = shutdown_timeout.as_millis(), "Clients still alive, aborting actors");
                for abort in aborts {
                    abort.abort();
                }
                Err(SystemError::ShutdownTimedOut(shutdown_timeout))
            }
        }
    }
}
