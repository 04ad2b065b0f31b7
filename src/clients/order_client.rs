//! # Order Client
//!
//! Places orders across the blocklist, catalog and ledger, drives the status
//! lifecycle and answers tracking lookups.
use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::{ActorClient, BlocklistClient, ProductClient};
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentMethod, PlaceOrder};
use crate::order_actor::{OrderAction, OrderError};

/// Client for the order ledger.
///
/// Placement runs these steps, stopping at the first failure:
/// 1. validate the request
/// 2. reject blocked pincodes (`DeliveryUnavailable`)
/// 3. load the product (`ProductNotFound`) and check payment method, size and color against it
/// 4. take the stock in one conditional step (`InsufficientStock`)
/// 5. insert the order; the ledger mints its id (`GenerationExhausted`)
///
/// If step 5 fails the reserved stock is handed back before the error is returned.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    blocklist: BlocklistClient,
    products: ProductClient,
    id_prefix: String,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        blocklist: BlocklistClient,
        products: ProductClient,
        id_prefix: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            blocklist,
            products,
            id_prefix: id_prefix.into(),
        }
    }

    #[instrument(skip(self, request), fields(product_id = %request.product_id, quantity = request.quantity))]
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, OrderError> {
        info!("Processing place_order request");
        validate(&request)?;

        // Step 1: Delivery eligibility
        let pincode = request.customer.pincode.trim().to_string();
        if self.blocklist.is_blocked(&pincode).await? {
            warn!(pincode = %pincode, "Delivery not available");
            return Err(OrderError::DeliveryUnavailable(pincode));
        }

        // Step 2: Load product
        let product = self
            .products
            .get_product(request.product_id.clone())
            .await?
            .ok_or_else(|| OrderError::ProductNotFound(request.product_id.clone()))?;

        if request.payment_method == PaymentMethod::Cod && !product.allow_cod {
            warn!(product_name = %product.name, "Cash on delivery not offered");
            return Err(OrderError::ValidationError(format!(
                "cash on delivery is not available for {}",
                product.name
            )));
        }

        check_variant("size", request.size.as_deref(), &product.sizes)?;
        check_variant("color", request.color.as_deref(), &product.colors)?;

        // Step 3: Reserve stock
        let quantity = request.quantity;
        let reserved = self
            .products
            .conditional_decrement(product.id.clone(), quantity)
            .await
            .map_err(|e| {
                warn!(error = %e, "Stock reservation failed");
                OrderError::from(e)
            })?;
        info!(remaining = reserved.stock, "Stock reserved");

        // Step 4: Record the order
        let params = OrderCreate::snapshot(&reserved, request);
        match self.inner.create(params).await {
            Ok(order) => {
                info!(order_id = %order.order_id, total = %order.total, "Order placed");
                Ok(order)
            }
            Err(e) => {
                let failure = OrderError::from(e);
                error!(error = %failure, "Order insert failed, releasing reserved stock");
                if let Err(restock_error) = self.products.restock(reserved.id.clone(), quantity).await {
                    error!(
                        error = %restock_error,
                        product_id = %reserved.id,
                        quantity,
                        "Failed to release reserved stock"
                    );
                }
                Err(failure)
            }
        }
    }

    /// Moves an order one step along its lifecycle.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, order_id: String, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(order_id, OrderAction::Advance(status)).await {
            Ok(order) => {
                info!(status = %order.status, "Order status advanced");
                Ok(order)
            }
            Err(e) => {
                let failure = OrderError::from(e);
                warn!(error = %failure, "Order status not advanced");
                Err(failure)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_order_id(&self, order_id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        self.get(order_id.trim().to_string()).await
    }

    /// The most recent order placed with exactly this phone number.
    #[instrument(skip(self))]
    pub async fn find_latest_by_phone(&self, phone: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        let matches = self
            .inner
            .query(move |order: &Order| order.customer.phone == phone)
            .await?;
        Ok(latest(matches))
    }

    /// Looks up by order id when `identifier` carries the id prefix, else by phone.
    #[instrument(skip(self))]
    pub async fn track(&self, identifier: &str) -> Result<Option<Order>, OrderError> {
        let identifier = identifier.trim();
        if identifier.starts_with(&format!("{}-", self.id_prefix)) {
            self.find_by_order_id(identifier.to_string()).await
        } else {
            self.find_latest_by_phone(identifier.to_string()).await
        }
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.list().await?;
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

/// Latest `created_at` wins; among equal timestamps the last in `orders` wins.
/// `orders` must be in insertion order.
fn latest(orders: Vec<Order>) -> Option<Order> {
    orders.into_iter().max_by_key(|order| order.created_at)
}

/// A chosen size or color must be one the product offers, when it offers any.
fn check_variant(kind: &str, chosen: Option<&str>, offered: &[String]) -> Result<(), OrderError> {
    match chosen {
        Some(value) if !offered.is_empty() && !offered.iter().any(|o| o == value) => Err(
            OrderError::ValidationError(format!("{kind} {value} is not available")),
        ),
        _ => Ok(()),
    }
}

fn validate(request: &PlaceOrder) -> Result<(), OrderError> {
    if request.quantity == 0 {
        return Err(OrderError::ValidationError("quantity must be positive".to_string()));
    }
    if request.product_id.trim().is_empty() {
        return Err(OrderError::ValidationError("product id must not be empty".to_string()));
    }
    if let Some(field) = request.customer.first_blank_field() {
        return Err(OrderError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> OrderError {
        e.into()
    }
}
