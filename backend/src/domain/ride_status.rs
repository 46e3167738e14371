//! Ride lifecycle state machine.
//!
//! A ride's status history is append-only; the rules here decide which entry,
//! if any, gets appended next. Two entry points exist:
//!
//! - [`chair_transition`]: a chair explicitly asks for a new status.
//! - [`location_transition`]: a chair reports its position and the ride may
//!   advance on its own.
//!
//! Both are pure. Adapters call them while holding the ride row lock so the
//! status they observe is the status they append after.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Ride};

/// Closed set of ride statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RideStatus {
    /// Waiting for a chair to be assigned.
    Matching,
    /// Assigned chair is heading to the pickup point.
    Enroute,
    /// Chair has reached the pickup point.
    Pickup,
    /// Rider is on board.
    Carrying,
    /// Chair has reached the destination.
    Arrived,
    /// Ride finished and settled.
    Completed,
    /// Ride abandoned.
    Canceled,
}

impl RideStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Matching,
        Self::Enroute,
        Self::Pickup,
        Self::Carrying,
        Self::Arrived,
        Self::Completed,
        Self::Canceled,
    ];

    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matching => "MATCHING",
            Self::Enroute => "ENROUTE",
            Self::Pickup => "PICKUP",
            Self::Carrying => "CARRYING",
            Self::Arrived => "ARRIVED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Terminal statuses never advance through location updates.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRideStatusError {
    value: String,
}

impl ParseRideStatusError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Display for ParseRideStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ride status: {}", self.value)
    }
}

impl std::error::Error for ParseRideStatusError {}

impl FromStr for RideStatus {
    type Err = ParseRideStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseRideStatusError {
                value: s.to_owned(),
            })
    }
}

/// Reason a chair-requested status change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    /// `CARRYING` was requested before the ride reached `PICKUP`.
    NotArrived,
    /// Chairs may only request `ENROUTE` or `CARRYING`.
    UnsupportedStatus(RideStatus),
}

impl fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotArrived => f.write_str("chair has not arrived yet"),
            Self::UnsupportedStatus(_) => f.write_str("invalid status"),
        }
    }
}

impl std::error::Error for TransitionRejection {}

/// Decide whether a chair may move a ride from `current` to `requested`.
///
/// `current` is `None` when the ride has no status history yet. On success
/// the returned status is the one to append.
///
/// `ENROUTE` carries no precondition on the current status: an assigned
/// chair may acknowledge a ride at any point, including re-acknowledging it.
///
/// # Examples
/// ```
/// use chair_dispatch::domain::{RideStatus, TransitionRejection, chair_transition};
///
/// assert_eq!(
///     chair_transition(Some(RideStatus::Pickup), RideStatus::Carrying),
///     Ok(RideStatus::Carrying)
/// );
/// assert_eq!(
///     chair_transition(Some(RideStatus::Enroute), RideStatus::Carrying),
///     Err(TransitionRejection::NotArrived)
/// );
/// ```
pub fn chair_transition(
    current: Option<RideStatus>,
    requested: RideStatus,
) -> Result<RideStatus, TransitionRejection> {
    match requested {
        RideStatus::Enroute => Ok(RideStatus::Enroute),
        RideStatus::Carrying => match current {
            Some(RideStatus::Pickup) => Ok(RideStatus::Carrying),
            _ => Err(TransitionRejection::NotArrived),
        },
        RideStatus::Matching
        | RideStatus::Pickup
        | RideStatus::Arrived
        | RideStatus::Completed
        | RideStatus::Canceled => Err(TransitionRejection::UnsupportedStatus(requested)),
    }
}

/// Status to append after the assigned chair reports `position`, if any.
///
/// Matching is exact: `ENROUTE` at the pickup point yields `PICKUP`, and
/// `CARRYING` at the destination yields `ARRIVED`. Terminal rides and rides
/// without history never advance.
pub fn location_transition(
    ride: &Ride,
    current: Option<RideStatus>,
    position: Coordinate,
) -> Option<RideStatus> {
    let status = current.filter(|status| !status.is_terminal())?;
    match status {
        RideStatus::Enroute if position == ride.pickup => Some(RideStatus::Pickup),
        RideStatus::Carrying if position == ride.destination => Some(RideStatus::Arrived),
        _ => None,
    }
}

#[cfg(test)]
#[path = "ride_status_tests.rs"]
mod tests;
