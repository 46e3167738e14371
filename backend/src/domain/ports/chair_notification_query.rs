//! Driving port for the chair notification poll.

use async_trait::async_trait;

use crate::domain::{ChairId, ChairNotification, Error};

/// Request for the next notification of a chair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChairNotificationRequest {
    pub chair_id: ChairId,
}

/// Poll result; `data` is empty when the chair has no ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChairNotificationResponse {
    pub data: Option<ChairNotification>,
    pub retry_after_ms: u32,
}

/// Driving port delivering ride status events to chairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChairNotificationQuery: Send + Sync {
    /// Deliver at most one pending status event, oldest first.
    async fn next_notification(
        &self,
        request: ChairNotificationRequest,
    ) -> Result<ChairNotificationResponse, Error>;
}
