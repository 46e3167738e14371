//! Port for ride persistence.
//!
//! Every method is one atomic unit of work. Adapters take an exclusive lock
//! on the affected ride row before reading its status history and keep it
//! until commit, so status appends and delivery marks for one ride are
//! serialised. Any failure rolls the whole unit back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    ChairId, ChairNotification, Coordinate, RideId, RideStatus, TransitionRejection,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ride repository adapters.
    pub enum RideRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ride repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ride repository query failed: {message}",
        /// No ride exists with the requested identifier.
        RideNotFound { ride_id: RideId } => "ride {ride_id} not found",
        /// The ride exists but another chair (or none) is assigned to it.
        NotAssigned { ride_id: RideId, chair_id: ChairId } =>
            "chair {chair_id} is not assigned to ride {ride_id}",
        /// The lifecycle rules refused the requested status.
        Transition { rejection: TransitionRejection } => "{rejection}",
    }
}

/// Outcome of recording a chair location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLocation {
    /// Timestamp stored on the location row.
    pub recorded_at: DateTime<Utc>,
    /// Latest ride of the chair, if it has one.
    pub ride_id: Option<RideId>,
    /// Status appended by an automatic transition, if one fired.
    pub appended: Option<RideStatus>,
}

/// Port for the ride lifecycle units of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Append a location row for `chair_id`, then apply
    /// [`crate::domain::location_transition`] to the chair's most recently
    /// updated ride.
    async fn record_location(
        &self,
        chair_id: &ChairId,
        position: Coordinate,
    ) -> Result<RecordedLocation, RideRepositoryError>;

    /// Apply [`crate::domain::chair_transition`] to `ride_id` on behalf of
    /// `chair_id` and append the resulting status.
    ///
    /// Fails with `RideNotFound`, `NotAssigned` or `Transition` without
    /// writing anything.
    async fn apply_chair_status(
        &self,
        ride_id: &RideId,
        chair_id: &ChairId,
        requested: RideStatus,
    ) -> Result<RideStatus, RideRepositoryError>;

    /// Report the oldest undelivered status of the chair's most recently
    /// updated ride and mark it delivered.
    ///
    /// When nothing is pending the current status is reported unchanged.
    /// Returns `None` when the chair has no ride.
    async fn claim_notification(
        &self,
        chair_id: &ChairId,
    ) -> Result<Option<ChairNotification>, RideRepositoryError>;

    /// Update the availability flag of `chair_id`.
    async fn set_chair_activity(
        &self,
        chair_id: &ChairId,
        is_active: bool,
    ) -> Result<(), RideRepositoryError>;
}
