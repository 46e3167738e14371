//! Driving port for chair availability.

use async_trait::async_trait;

use crate::domain::{ChairId, Error};

/// Request to mark a chair as accepting (or not accepting) rides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateChairActivityRequest {
    pub chair_id: ChairId,
    pub is_active: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChairActivityCommand: Send + Sync {
    /// Store the availability flag.
    async fn update_activity(&self, request: UpdateChairActivityRequest) -> Result<(), Error>;
}
