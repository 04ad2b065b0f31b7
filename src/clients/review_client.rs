use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::{ActorClient, ProductClient};
use crate::domain::{rating_summary, Review, ReviewCreate};
use crate::review_actor::{entity::validate, ReviewError};

/// Client for the review store. Keeps each product's rating and review count
/// in step with its reviews.
///
/// After a review is stored the aggregate is recomputed from the product's
/// full review set and written back, tagged with the review store revision it
/// was read at. The catalog keeps only the highest revision, so the last write
/// standing always reflects every stored review. When a review is withdrawn
/// the aggregate is recomputed once more, at a revision past the withdrawal.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
    products: ProductClient,
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>, products: ProductClient) -> Self {
        Self { inner, products }
    }

    #[instrument(skip(self, params), fields(product_id = %params.product_id, rating = params.rating))]
    pub async fn add_review(&self, params: ReviewCreate) -> Result<Review, ReviewError> {
        info!("Processing add_review request");
        validate(&params)?;

        if self.products.get_product(params.product_id.clone()).await?.is_none() {
            return Err(ReviewError::ProductNotFound(params.product_id));
        }

        let review = self.inner.create(params).await?;
        debug!(review_id = %review.id, "Review stored");

        if let Err(e) = self.refresh_aggregate(&review.product_id).await {
            error!(error = %e, review_id = %review.id, "Aggregate update failed, withdrawing review");
            match self.inner.delete(review.id.clone()).await {
                Ok(()) => {
                    if let Err(refresh_error) = self.refresh_aggregate(&review.product_id).await {
                        error!(error = %refresh_error, product_id = %review.product_id, "Failed to recompute rating after withdrawal");
                    }
                }
                Err(delete_error) => {
                    error!(error = %delete_error, review_id = %review.id, "Failed to withdraw review");
                }
            }
            return Err(e);
        }

        info!(review_id = %review.id, "Review added");
        Ok(review)
    }

    /// Every review for a product, in the order they were written.
    #[instrument(skip(self))]
    pub async fn all_for(&self, product_id: String) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        Ok(self
            .inner
            .query(move |review: &Review| review.product_id == product_id)
            .await?)
    }

    /// Reviews for a product, newest first.
    #[instrument(skip(self))]
    pub async fn reviews_for(&self, product_id: String) -> Result<Vec<Review>, ReviewError> {
        let mut reviews = self.all_for(product_id).await?;
        reviews.reverse();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn refresh_aggregate(&self, product_id: &str) -> Result<(), ReviewError> {
        let wanted = product_id.to_string();
        let snapshot = self
            .inner
            .snapshot(move |review: &Review| review.product_id == wanted)
            .await?;
        let (rating, count) = rating_summary(&snapshot.items);
        let applied = self
            .products
            .update_aggregate(product_id.to_string(), rating, count, snapshot.revision)
            .await?;
        if applied {
            debug!(rating, count, "Aggregate written");
        } else {
            debug!(count, "A newer aggregate is already stored");
        }
        Ok(())
    }
}

#[async_trait]
impl ActorClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &ResourceClient<Review> {
        &self.inner
    }

    fn map_error(e: FrameworkError<ReviewError>) -> ReviewError {
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::StoreSystem;
    use crate::config::StoreConfig;
    use crate::domain::{Product, ProductCreate};
    use crate::mock_framework::{create_mock_client, expect_action, expect_get};
    use crate::product_actor::{ProductAction, ProductActionResult};
    use rust_decimal::Decimal;
    use std::time::Duration;

    async fn product(system: &StoreSystem) -> Product {
        system
            .product_client
            .create_product(ProductCreate::new("Denim Jacket", Decimal::from(2499), 4))
            .await
            .unwrap()
    }

    async fn aggregate(system: &StoreSystem, id: &str) -> (f64, u32) {
        let product = system.product_client.get_product(id.to_string()).await.unwrap().unwrap();
        (product.rating, product.review_count)
    }

    fn review(product_id: &str, rating: u8) -> ReviewCreate {
        ReviewCreate::new(product_id, "Kabir", "9123456789", rating, "Fits well")
    }

    #[tokio::test]
    async fn test_rating_is_mean_of_all_reviews() {
        let system = StoreSystem::new(StoreConfig::default());
        let product = product(&system).await;

        for rating in [5, 4, 3] {
            system.review_client.add_review(review(&product.id, rating)).await.unwrap();
        }
        assert_eq!(aggregate(&system, &product.id).await, (4.0, 3));

        system.review_client.add_review(review(&product.id, 2)).await.unwrap();
        assert_eq!(aggregate(&system, &product.id).await, (3.5, 4));
    }

    #[tokio::test]
    async fn test_concurrent_reviews_do_not_lose_updates() {
        let system = StoreSystem::new(StoreConfig::default());
        let product = product(&system).await;

        let mut tasks = Vec::new();
        for i in 0..30u8 {
            let client = system.review_client.clone();
            let params = review(&product.id, i % 5 + 1);
            tasks.push(tokio::spawn(async move { client.add_review(params).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // 6 of each rating 1..=5
        assert_eq!(aggregate(&system, &product.id).await, (3.0, 30));
    }

    #[tokio::test]
    async fn test_invalid_reviews_are_not_stored() {
        let system = StoreSystem::new(StoreConfig::default());
        let product = product(&system).await;

        assert_eq!(
            system.review_client.add_review(review(&product.id, 6)).await,
            Err(ReviewError::InvalidRating(6))
        );
        assert_eq!(
            system.review_client.add_review(review("product_404", 4)).await,
            Err(ReviewError::ProductNotFound("product_404".into()))
        );

        assert!(system.review_client.all_for(product.id.clone()).await.unwrap().is_empty());
        assert_eq!(aggregate(&system, &product.id).await, (0.0, 0));
    }

    #[tokio::test]
    async fn test_reviews_are_scoped_to_product() {
        let system = StoreSystem::new(StoreConfig::default());
        let jacket = product(&system).await;
        let other = product(&system).await;

        system.review_client.add_review(review(&jacket.id, 5)).await.unwrap();
        system.review_client.add_review(review(&other.id, 1)).await.unwrap();
        let latest = system.review_client.add_review(review(&jacket.id, 3)).await.unwrap();

        let listed = system.review_client.reviews_for(jacket.id.clone()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, latest.id);
        assert_eq!(aggregate(&system, &jacket.id).await, (4.0, 2));
        assert_eq!(aggregate(&system, &other.id).await, (1.0, 1));
    }

    fn written_aggregate(action: ProductAction) -> (f64, u32, u64) {
        match action {
            ProductAction::UpdateAggregate { rating, count, revision } => (rating, count, revision),
            other => panic!("Unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_withdrawn_review_is_dropped_from_rating() {
        let (review_actor, review_inner) = crate::review_actor::new(&StoreConfig::default());
        tokio::spawn(review_actor.run());
        let (catalog_inner, mut catalog_rx) = create_mock_client::<Product>(10);
        let client = ReviewClient::new(review_inner, ProductClient::new(catalog_inner));
        let jacket = Product::new("product_1", "Denim Jacket", Decimal::from(2499), 4);

        // first review is stored, its rating write is held back
        let first = client.clone();
        let first_task = tokio::spawn(async move { first.add_review(review("product_1", 1)).await });
        let (_, responder) = expect_get(&mut catalog_rx).await.unwrap();
        responder.send(Ok(Some(jacket.clone()))).unwrap();
        let (_, _, held) = expect_action(&mut catalog_rx).await.unwrap();

        // second review counts the first one and its write lands
        let second = client.clone();
        let second_task = tokio::spawn(async move { second.add_review(review("product_1", 5)).await });
        let (_, responder) = expect_get(&mut catalog_rx).await.unwrap();
        responder.send(Ok(Some(jacket.clone()))).unwrap();
        let (_, action, responder) = expect_action(&mut catalog_rx).await.unwrap();
        let (rating, count, landed_revision) = written_aggregate(action);
        assert_eq!((rating, count), (3.0, 2));
        responder.send(Ok(ProductActionResult::AggregateApplied(true))).unwrap();
        second_task.await.unwrap().unwrap();

        // the held write fails, so the first review is withdrawn
        held.send(Err(FrameworkError::Timeout(Duration::from_millis(5)))).unwrap();
        let (_, action, responder) = expect_action(&mut catalog_rx).await.expect("Expected rating rewrite");
        let (rating, count, revision) = written_aggregate(action);
        assert_eq!((rating, count), (5.0, 1));
        assert!(revision > landed_revision);
        responder.send(Ok(ProductActionResult::AggregateApplied(true))).unwrap();

        assert!(matches!(first_task.await.unwrap(), Err(ReviewError::Infrastructure(_))));
        let stored: Vec<u8> = client
            .all_for("product_1".into())
            .await
            .unwrap()
            .iter()
            .map(|r| r.rating)
            .collect();
        assert_eq!(stored, vec![5]);
    }
}
