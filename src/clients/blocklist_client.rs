use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::blocklist_actor::BlocklistError;
use crate::clients::ActorClient;
use crate::domain::{BlockPincode, BlockedPincode};

/// Client for the pincode blocklist.
///
/// Lookups trim surrounding whitespace and otherwise match exactly.
#[derive(Clone)]
pub struct BlocklistClient {
    inner: ResourceClient<BlockedPincode>,
}

impl BlocklistClient {
    pub fn new(inner: ResourceClient<BlockedPincode>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn is_blocked(&self, pincode: &str) -> Result<bool, BlocklistError> {
        debug!("Sending request");
        let key = pincode.trim();
        if key.is_empty() {
            return Ok(false);
        }
        Ok(self.get(key.to_string()).await?.is_some())
    }

    #[instrument(skip(self))]
    pub async fn block(&self, pincode: &str, reason: Option<String>) -> Result<BlockedPincode, BlocklistError> {
        debug!("Sending request");
        let entry = self
            .inner
            .create(BlockPincode {
                pincode: pincode.to_string(),
                reason,
            })
            .await?;
        info!(pincode = %entry.pincode, reason = %entry.reason, "Pincode blocked");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn unblock(&self, pincode: &str) -> Result<(), BlocklistError> {
        debug!("Sending request");
        self.inner.delete(pincode.trim().to_string()).await?;
        info!("Pincode unblocked");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_blocked(&self) -> Result<Vec<BlockedPincode>, BlocklistError> {
        debug!("Sending request");
        self.list().await
    }
}

#[async_trait]
impl ActorClient<BlockedPincode> for BlocklistClient {
    type Error = BlocklistError;

    fn inner(&self) -> &ResourceClient<BlockedPincode> {
        &self.inner
    }

    fn map_error(e: FrameworkError<BlocklistError>) -> BlocklistError {
        e.into()
    }
}
