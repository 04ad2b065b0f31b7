use crate::domain::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status if the lifecycle allows it.
    /// Returns the updated order.
    Advance(OrderStatus),
}
