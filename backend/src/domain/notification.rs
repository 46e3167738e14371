//! Chair-side notification payloads.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RideId, RideStatus, RiderId};

/// Poll interval hint, in milliseconds, returned with every notification.
pub const NOTIFICATION_RETRY_AFTER_MS: u32 = 30;

/// Rider details embedded in a chair notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderSummary {
    pub id: RiderId,
    pub name: String,
}

/// One status event for the chair's current ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChairNotification {
    pub ride_id: RideId,
    pub rider: RiderSummary,
    pub pickup: Coordinate,
    pub destination: Coordinate,
    pub status: RideStatus,
    /// `true` when this poll marked a pending status row as delivered;
    /// `false` when no row was pending and the current status was repeated.
    pub newly_delivered: bool,
}
