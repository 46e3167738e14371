//! Driving port for chair-initiated ride status changes.

use async_trait::async_trait;

use crate::domain::{ChairId, Error, RideId, RideStatus};

/// Request to move a ride to `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRideStatusRequest {
    pub ride_id: RideId,
    pub chair_id: ChairId,
    pub status: RideStatus,
}

/// Response carrying the appended status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRideStatusResponse {
    pub status: RideStatus,
}

/// Driving port for the explicit status transition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChairRideStatusCommand: Send + Sync {
    /// Validate and append the requested status.
    ///
    /// Unknown rides map to `NotFound`; a chair that is not assigned to the
    /// ride, or a refused transition, map to `InvalidRequest`.
    async fn update_status(
        &self,
        request: UpdateRideStatusRequest,
    ) -> Result<UpdateRideStatusResponse, Error>;
}
