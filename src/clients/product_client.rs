use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::ActorClient;
use crate::domain::{Product, ProductCreate, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for the catalog actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.create(params).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: String) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Removes a product from the catalog. Orders already placed keep their snapshot.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: String) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner.delete(id.clone()).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.list().await
    }

    /// Takes `quantity` units if and only if that many are in stock.
    /// Returns the product as it stands after the decrement.
    #[instrument(skip(self))]
    pub async fn conditional_decrement(&self, id: String, quantity: u32) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::DecrementStock(quantity)).await? {
            ProductActionResult::StockReserved(product) => Ok(product),
            other => Err(ProductError::Infrastructure(format!("Unexpected result: {other:?}"))),
        }
    }

    /// Returns units taken by [`Self::conditional_decrement`]. Returns the new stock level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restocked(stock) => Ok(stock),
            other => Err(ProductError::Infrastructure(format!("Unexpected result: {other:?}"))),
        }
    }

    /// Writes a review aggregate read at `revision`. Returns `false` if a newer
    /// one was already stored.
    #[instrument(skip(self))]
    pub async fn update_aggregate(
        &self,
        id: String,
        rating: f64,
        count: u32,
        revision: u64,
    ) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::UpdateAggregate { rating, count, revision })
            .await?
        {
            ProductActionResult::AggregateApplied(applied) => Ok(applied),
            other => Err(ProductError::Infrastructure(format!("Unexpected result: {other:?}"))),
        }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError<ProductError>) -> ProductError {
        e.into()
    }
}
