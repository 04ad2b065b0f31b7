use chrono::Utc;
use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{BlockPincode, BlockedPincode, DEFAULT_BLOCK_REASON};
use super::error::BlocklistError;

impl Entity for BlockedPincode {
    type Id = String;
    type CreateParams = BlockPincode;
    type UpdateParams = Infallible;
    type Action = ();
    type ActionResult = ();
    type Error = BlocklistError;

    /// Blocked entries are keyed by the trimmed pincode itself.
    fn natural_id(params: &BlockPincode) -> Option<String> {
        Some(params.pincode.trim().to_string())
    }

    fn from_create_params(pincode: String, params: BlockPincode) -> Result<Self, BlocklistError> {
        if pincode.is_empty() {
            return Err(BlocklistError::ValidationError("pincode must not be empty".to_string()));
        }
        let reason = params
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_BLOCK_REASON.to_string());
        Ok(Self {
            pincode,
            reason,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), BlocklistError> {
        match update {}
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), BlocklistError> {
        Ok(())
    }
}
