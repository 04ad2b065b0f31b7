use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductUpdate};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price <= Decimal::ZERO {
        return Err(ProductError::ValidationError(format!("price must be positive, got {price}")));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("name must not be empty".to_string()));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    /// Creates a new Product from creation parameters, with no reviews yet.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        let mut product = Self::new(id, params.name.trim(), params.price, params.stock);
        product.allow_cod = params.allow_cod;
        product.category = params.category;
        product.image = params.image;
        product.images = params.images;
        product.description = params.description;
        product.sizes = params.sizes;
        product.colors = params.colors;
        Ok(product)
    }

    /// Applies admin edits.
    ///
    /// # Fields Updated
    /// - `name`, `price`, `stock`, `allow_cod`, `category`
    /// - `image`, `images`, `description`, `sizes`, `colors`
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(allow_cod) = update.allow_cod {
            self.allow_cod = allow_cod;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(sizes) = update.sizes {
            self.sizes = sizes;
        }
        if let Some(colors) = update.colors {
            self.colors = colors;
        }
        Ok(())
    }

    /// Handles stock and aggregate actions.
    ///
    /// # Errors
    /// - `InvalidQuantity` for a zero-unit decrement or restock
    /// - `InsufficientStock` when fewer units remain than requested
    /// - `ValidationError` for a rating outside 0-5 or a stock overflow
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::DecrementStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::StockReserved(self.clone()))
            }
            ProductAction::Restock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::ValidationError(format!("restocking {quantity} overflows stock"))
                })?;
                Ok(ProductActionResult::Restocked(self.stock))
            }
            ProductAction::UpdateAggregate { rating, count, revision } => {
                if revision < self.review_revision {
                    return Ok(ProductActionResult::AggregateApplied(false));
                }
                if !(0.0..=5.0).contains(&rating) {
                    return Err(ProductError::ValidationError(format!("rating {rating} is outside 0-5")));
                }
                self.rating = rating;
                self.review_count = count;
                self.review_revision = revision;
                Ok(ProductActionResult::AggregateApplied(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee(stock: u32) -> Product {
        Product::new("product_1", "Linen Tee", Decimal::from(499), stock)
    }

    #[test]
    fn test_decrement_requires_enough_stock() {
        let mut product = tee(3);
        match product.handle_action(ProductAction::DecrementStock(2)) {
            Ok(ProductActionResult::StockReserved(after)) => assert_eq!(after.stock, 1),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(
            product.handle_action(ProductAction::DecrementStock(2)).unwrap_err(),
            ProductError::InsufficientStock { requested: 2, available: 1 }
        );
        assert_eq!(product.stock, 1);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut product = tee(3);
        assert_eq!(
            product.handle_action(ProductAction::DecrementStock(0)).unwrap_err(),
            ProductError::InvalidQuantity(0)
        );
        assert_eq!(
            product.handle_action(ProductAction::Restock(0)).unwrap_err(),
            ProductError::InvalidQuantity(0)
        );
    }

    #[test]
    fn test_stale_aggregate_is_ignored() {
        let mut product = tee(1);
        let applied = product.handle_action(ProductAction::UpdateAggregate { rating: 4.0, count: 3, revision: 3 });
        assert!(matches!(applied, Ok(ProductActionResult::AggregateApplied(true))));

        let stale = product.handle_action(ProductAction::UpdateAggregate { rating: 5.0, count: 2, revision: 2 });
        assert!(matches!(stale, Ok(ProductActionResult::AggregateApplied(false))));
        assert_eq!(product.rating, 4.0);
        assert_eq!(product.review_count, 3);
    }

    #[test]
    fn test_newer_aggregate_may_shrink_count() {
        let mut product = tee(1);
        product
            .handle_action(ProductAction::UpdateAggregate { rating: 3.0, count: 2, revision: 2 })
            .unwrap();

        // a review was withdrawn after the previous write
        let applied = product.handle_action(ProductAction::UpdateAggregate { rating: 5.0, count: 1, revision: 3 });
        assert!(matches!(applied, Ok(ProductActionResult::AggregateApplied(true))));
        assert_eq!((product.rating, product.review_count), (5.0, 1));
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let params = ProductCreate::new("Free Tee", Decimal::ZERO, 5);
        assert!(matches!(
            Product::from_create_params("product_1".into(), params),
            Err(ProductError::ValidationError(_))
        ));
    }
}
