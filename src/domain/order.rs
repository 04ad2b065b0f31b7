use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CustomerInfo, OrderStatus, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// A customer order as recorded in the ledger.
///
/// Everything except `status` is fixed when the order is created. `price` is
/// the product's unit price at that moment and `total` is derived from it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A request to buy `quantity` units of one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub product_id: String,
    pub quantity: u32,
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub size: Option<String>,
    pub color: Option<String>,
    pub payment_method: PaymentMethod,
}

impl PlaceOrder {
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        customer: CustomerInfo,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            customer,
            size: None,
            color: None,
            payment_method,
        }
    }

    pub fn with_variant(mut self, size: impl Into<String>, color: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self.color = Some(color.into());
        self
    }
}

/// Params for inserting an order into the ledger. The ledger assigns the id.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub product_id: String,
    pub product_name: String,
    pub customer: CustomerInfo,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: Decimal,
    pub payment_method: PaymentMethod,
}

impl OrderCreate {
    /// Captures the product's name and price as they were when stock was reserved.
    pub fn snapshot(product: &Product, request: PlaceOrder) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            customer: request.customer.trimmed(),
            size: request.size,
            color: request.color,
            quantity: request.quantity,
            price: product.price,
            payment_method: request.payment_method,
        }
    }
}
