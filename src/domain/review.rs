use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A customer's rating of a product. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub customer_name: String,
    pub phone: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub product_id: String,
    pub customer_name: String,
    pub phone: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl ReviewCreate {
    pub fn new(
        product_id: impl Into<String>,
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            customer_name: customer_name.into(),
            phone: phone.into(),
            rating,
            comment: comment.into(),
        }
    }
}

/// Mean rating and count over a set of reviews, `(0.0, 0)` when empty.
pub fn rating_summary(reviews: &[Review]) -> (f64, u32) {
    if reviews.is_empty() {
        return (0.0, 0);
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let count = reviews.len() as u32;
    (f64::from(sum) / f64::from(count), count)
}
