//! Chair-facing ride services.
//!
//! One service implements every chair driving port on top of a
//! [`RideRepository`]. The lifecycle rules themselves live in
//! [`crate::domain::ride_status`]; this layer maps repository outcomes onto
//! domain errors and logs what happened.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    ChairActivityCommand, ChairLocationCommand, ChairNotificationQuery, ChairNotificationRequest,
    ChairNotificationResponse, ChairRideStatusCommand, RecordChairLocationRequest,
    RecordChairLocationResponse, RideRepository, RideRepositoryError, UpdateChairActivityRequest,
    UpdateRideStatusRequest, UpdateRideStatusResponse,
};
use crate::domain::{Error, NOTIFICATION_RETRY_AFTER_MS};

fn map_repository_error(error: RideRepositoryError) -> Error {
    match error {
        RideRepositoryError::RideNotFound { .. } => Error::not_found("ride not found"),
        RideRepositoryError::NotAssigned { .. } => {
            Error::invalid_request("not assigned to this ride")
        }
        RideRepositoryError::Transition { rejection } => {
            Error::invalid_request(rejection.to_string())
        }
        RideRepositoryError::Connection { message } | RideRepositoryError::Query { message } => {
            error!(%message, "ride repository failure");
            Error::internal(format!("ride repository error: {message}"))
        }
    }
}

/// Service implementing the chair driving ports.
#[derive(Clone)]
pub struct ChairRideService<R> {
    rides: Arc<R>,
}

impl<R> ChairRideService<R> {
    /// Create a new service over the ride repository.
    pub fn new(rides: Arc<R>) -> Self {
        Self { rides }
    }
}

#[async_trait]
impl<R> ChairLocationCommand for ChairRideService<R>
where
    R: RideRepository,
{
    async fn record_location(
        &self,
        request: RecordChairLocationRequest,
    ) -> Result<RecordChairLocationResponse, Error> {
        let recorded = self
            .rides
            .record_location(&request.chair_id, request.position)
            .await
            .map_err(map_repository_error)?;

        if let (Some(ride_id), Some(status)) = (recorded.ride_id, recorded.appended) {
            info!(
                chair_id = %request.chair_id,
                %ride_id,
                %status,
                "chair location advanced ride"
            );
        }

        Ok(RecordChairLocationResponse {
            recorded_at: recorded.recorded_at,
        })
    }
}

#[async_trait]
impl<R> ChairRideStatusCommand for ChairRideService<R>
where
    R: RideRepository,
{
    async fn update_status(
        &self,
        request: UpdateRideStatusRequest,
    ) -> Result<UpdateRideStatusResponse, Error> {
        let status = self
            .rides
            .apply_chair_status(&request.ride_id, &request.chair_id, request.status)
            .await
            .map_err(map_repository_error)?;

        info!(
            chair_id = %request.chair_id,
            ride_id = %request.ride_id,
            %status,
            "chair updated ride status"
        );
        Ok(UpdateRideStatusResponse { status })
    }
}

#[async_trait]
impl<R> ChairNotificationQuery for ChairRideService<R>
where
    R: RideRepository,
{
    async fn next_notification(
        &self,
        request: ChairNotificationRequest,
    ) -> Result<ChairNotificationResponse, Error> {
        let data = self
            .rides
            .claim_notification(&request.chair_id)
            .await
            .map_err(map_repository_error)?;

        if let Some(notification) = data.as_ref().filter(|n| n.newly_delivered) {
            debug!(
                chair_id = %request.chair_id,
                ride_id = %notification.ride_id,
                status = %notification.status,
                "delivered ride status to chair"
            );
        }

        Ok(ChairNotificationResponse {
            data,
            retry_after_ms: NOTIFICATION_RETRY_AFTER_MS,
        })
    }
}

#[async_trait]
impl<R> ChairActivityCommand for ChairRideService<R>
where
    R: RideRepository,
{
    async fn update_activity(&self, request: UpdateChairActivityRequest) -> Result<(), Error> {
        self.rides
            .set_chair_activity(&request.chair_id, request.is_active)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "chair_ride_service_tests.rs"]
mod tests;
