use chrono::Utc;
use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Review, ReviewCreate, MAX_RATING, MIN_RATING};
use super::error::ReviewError;

/// Checks a review before anything is stored.
pub fn validate(params: &ReviewCreate) -> Result<(), ReviewError> {
    if !(MIN_RATING..=MAX_RATING).contains(&params.rating) {
        return Err(ReviewError::InvalidRating(params.rating));
    }
    if params.customer_name.trim().is_empty() {
        return Err(ReviewError::ValidationError("customer name must not be empty".to_string()));
    }
    if params.phone.trim().is_empty() {
        return Err(ReviewError::ValidationError("phone must not be empty".to_string()));
    }
    Ok(())
}

impl Entity for Review {
    type Id = String;
    type CreateParams = ReviewCreate;
    type UpdateParams = Infallible;
    type Action = ();
    type ActionResult = ();
    type Error = ReviewError;

    fn from_create_params(id: String, params: ReviewCreate) -> Result<Self, ReviewError> {
        validate(&params)?;
        Ok(Self {
            id,
            product_id: params.product_id,
            customer_name: params.customer_name.trim().to_string(),
            phone: params.phone.trim().to_string(),
            rating: params.rating,
            comment: params.comment,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), ReviewError> {
        match update {}
    }

    /// Reviews have no actions.
    fn handle_action(&mut self, _action: ()) -> Result<(), ReviewError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        for rating in [0, 6, 255] {
            let params = ReviewCreate::new("product_1", "Ravi", "9000000000", rating, "");
            assert_eq!(validate(&params), Err(ReviewError::InvalidRating(rating)));
        }
        for rating in MIN_RATING..=MAX_RATING {
            let params = ReviewCreate::new("product_1", "Ravi", "9000000000", rating, "ok");
            assert!(validate(&params).is_ok());
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let params = ReviewCreate::new("product_1", "  ", "9000000000", 4, "");
        assert!(matches!(validate(&params), Err(ReviewError::ValidationError(_))));
    }
}
