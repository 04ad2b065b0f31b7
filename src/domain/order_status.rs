use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle of an order.
///
/// Statuses only move forward through
/// `pending -> confirmed -> packed -> shipped -> delivered`, and any
/// non-terminal status may be cancelled. `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Destinations reachable in one step from `self`.
    pub fn allowed_transitions(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Cancelled],
            Confirmed => &[Packed, Cancelled],
            Packed => &[Shipped, Cancelled],
            Shipped => &[Delivered, Cancelled],
            Delivered | Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_chain_is_allowed() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Packed));
        assert!(Packed.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn test_skipping_or_going_back_is_rejected() {
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Packed.can_transition_to(Confirmed));
        assert!(!Shipped.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_only_from_non_terminal() {
        for status in OrderStatus::ALL {
            assert_eq!(status.can_transition_to(Cancelled), !status.is_terminal(), "{status}");
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
        for next in OrderStatus::ALL {
            assert!(!Delivered.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("shipped".parse::<OrderStatus>(), Ok(Shipped));
        assert_eq!(" Packed ".parse::<OrderStatus>(), Ok(Packed));
        assert_eq!("lost".parse::<OrderStatus>(), Err(UnknownStatus("lost".into())));
        assert_eq!(Delivered.to_string(), "delivered");
        assert_eq!(serde_json::to_string(&Cancelled).unwrap(), "\"cancelled\"");
    }
}
