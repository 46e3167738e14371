//! Ride aggregate and the grid coordinates it refers to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChairId, RideId, RiderId};

/// Integer grid position reported by chairs and stored on rides.
///
/// Coordinates are compared for exact equality; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: i32,
    pub longitude: i32,
}

impl Coordinate {
    /// Construct a coordinate from its components.
    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A ride request with its (optional) assigned chair.
///
/// Status is not part of the ride; it is the latest entry of the ride's
/// append-only status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub id: RideId,
    pub rider_id: RiderId,
    pub chair_id: Option<ChairId>,
    pub pickup: Coordinate,
    pub destination: Coordinate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Whether `chair_id` is the chair assigned to this ride.
    pub fn is_assigned_to(&self, chair_id: &ChairId) -> bool {
        self.chair_id.as_ref() == Some(chair_id)
    }
}
