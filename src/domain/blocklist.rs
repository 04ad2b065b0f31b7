use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BLOCK_REASON: &str = "Delivery not available";

/// A postal code that orders cannot be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedPincode {
    pub pincode: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockPincode {
    pub pincode: String,
    pub reason: Option<String>,
}
