use chrono::Utc;
use rust_decimal::Decimal;
use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentStatus};
use super::actions::OrderAction;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    /// Ledger records are never patched; status moves only through [`OrderAction`].
    type UpdateParams = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    /// Creates a new Order from creation parameters.
    ///
    /// # Notes
    /// The order starts `pending` with payment `pending`; `total` is computed
    /// here once from the snapshotted unit price.
    fn from_create_params(order_id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError("quantity must be positive".to_string()));
        }
        if params.price <= Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "price must be positive, got {}",
                params.price
            )));
        }
        let total = params.price * Decimal::from(params.quantity);

        Ok(Self {
            order_id,
            product_id: params.product_id,
            product_name: params.product_name,
            customer: params.customer,
            size: params.size,
            color: params.color,
            quantity: params.quantity,
            price: params.price,
            total,
            payment_method: params.payment_method,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), OrderError> {
        match update {}
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            OrderAction::Advance(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerInfo, PaymentMethod};
    use std::str::FromStr;

    fn params(quantity: u32) -> OrderCreate {
        OrderCreate {
            product_id: "product_1".into(),
            product_name: "Linen Tee".into(),
            customer: CustomerInfo::new("Asha", "9876543210", "12 MG Road", "560001"),
            size: Some("M".into()),
            color: None,
            quantity,
            price: Decimal::from_str("499.50").unwrap(),
            payment_method: PaymentMethod::Cod,
        }
    }

    #[test]
    fn test_total_is_price_times_quantity() {
        let order = Order::from_create_params("CC-20250101-001".into(), params(3)).unwrap();
        assert_eq!(order.total, Decimal::from_str("1498.50").unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        assert!(matches!(
            Order::from_create_params("CC-20250101-001".into(), params(0)),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn test_advance_changes_only_status() {
        let mut order = Order::from_create_params("CC-20250101-001".into(), params(1)).unwrap();
        let before = order.clone();

        let confirmed = order.handle_action(OrderAction::Advance(OrderStatus::Confirmed)).unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);
        assert_eq!(confirmed.order_id, before.order_id);
        assert_eq!(confirmed.total, before.total);
        assert_eq!(confirmed.created_at, before.created_at);

        assert_eq!(
            order.handle_action(OrderAction::Advance(OrderStatus::Delivered)),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Confirmed,
                to: OrderStatus::Delivered
            })
        );
    }
}
