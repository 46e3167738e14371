//! Chair-facing HTTP handlers.
//!
//! ```text
//! POST /api/chair/coordinate              Report the chair position
//! POST /api/chair/rides/{ride_id}/status  Request a ride status change
//! GET  /api/chair/notification            Poll for the next ride event
//! POST /api/chair/activity                Toggle availability
//! ```
//!
//! Every endpoint requires the `chair_session` cookie.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ChairNotificationRequest, ChairNotificationResponse, RecordChairLocationRequest,
    UpdateChairActivityRequest, UpdateRideStatusRequest,
};
use crate::domain::{ChairNotification, Coordinate, Error, RideId, RideStatus};
use crate::inbound::http::auth::ChairSession;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Grid coordinate as sent and received on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CoordinateBody {
    #[schema(example = 10)]
    pub latitude: i32,
    #[schema(example = 10)]
    pub longitude: i32,
}

impl From<CoordinateBody> for Coordinate {
    fn from(body: CoordinateBody) -> Self {
        Coordinate::new(body.latitude, body.longitude)
    }
}

impl From<Coordinate> for CoordinateBody {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

/// Response to a location report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordCoordinateResponseBody {
    /// Storage timestamp of the location, in Unix milliseconds.
    #[schema(example = 1_733_000_000_000_i64)]
    pub recorded_at: i64,
}

/// Requested ride status.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateRideStatusRequestBody {
    /// `ENROUTE` or `CARRYING`.
    #[schema(example = "CARRYING")]
    pub status: String,
}

/// Rider identity embedded in a notification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationUserBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "Hanako Yamada")]
    pub name: String,
}

/// One ride event delivered to the chair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChairNotificationBody {
    #[schema(format = "uuid")]
    pub ride_id: String,
    pub user: NotificationUserBody,
    pub pickup_coordinate: CoordinateBody,
    pub destination_coordinate: CoordinateBody,
    #[schema(example = "ENROUTE")]
    pub status: String,
}

/// Poll response; `data` is `null` when the chair has no ride.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChairNotificationResponseBody {
    pub data: Option<ChairNotificationBody>,
    /// Suggested delay before the next poll.
    #[schema(example = 30)]
    pub retry_after_ms: u32,
}

/// Availability toggle.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateChairActivityRequestBody {
    pub is_active: bool,
}

impl From<ChairNotification> for ChairNotificationBody {
    fn from(value: ChairNotification) -> Self {
        Self {
            ride_id: value.ride_id.to_string(),
            user: NotificationUserBody {
                id: value.rider.id.to_string(),
                name: value.rider.name,
            },
            pickup_coordinate: value.pickup.into(),
            destination_coordinate: value.destination.into(),
            status: value.status.to_string(),
        }
    }
}

impl From<ChairNotificationResponse> for ChairNotificationResponseBody {
    fn from(value: ChairNotificationResponse) -> Self {
        Self {
            data: value.data.map(ChairNotificationBody::from),
            retry_after_ms: value.retry_after_ms,
        }
    }
}

/// Record the chair's position and advance its ride when a waypoint is
/// reached.
#[utoipa::path(
    post,
    path = "/api/chair/coordinate",
    request_body = CoordinateBody,
    responses(
        (status = 200, description = "Location recorded", body = RecordCoordinateResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["chair"],
    operation_id = "chairPostCoordinate",
    security(("ChairSession" = []))
)]
#[post("/coordinate")]
pub async fn post_coordinate(
    state: web::Data<HttpState>,
    session: ChairSession,
    payload: web::Json<CoordinateBody>,
) -> ApiResult<web::Json<RecordCoordinateResponseBody>> {
    let chair = session.into_inner();
    let response = state
        .chair_locations
        .record_location(RecordChairLocationRequest {
            chair_id: chair.id,
            position: payload.into_inner().into(),
        })
        .await?;

    Ok(web::Json(RecordCoordinateResponseBody {
        recorded_at: response.recorded_at.timestamp_millis(),
    }))
}

/// Request `ENROUTE` or `CARRYING` for a ride assigned to the chair.
#[utoipa::path(
    post,
    path = "/api/chair/rides/{ride_id}/status",
    params(("ride_id" = String, Path, description = "Ride identifier")),
    request_body = UpdateRideStatusRequestBody,
    responses(
        (status = 204, description = "Status appended"),
        (status = 400, description = "Not assigned or transition refused", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Ride not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["chair"],
    operation_id = "chairPostRideStatus",
    security(("ChairSession" = []))
)]
#[post("/rides/{ride_id}/status")]
pub async fn post_ride_status(
    state: web::Data<HttpState>,
    session: ChairSession,
    path: web::Path<String>,
    payload: web::Json<UpdateRideStatusRequestBody>,
) -> ApiResult<HttpResponse> {
    let chair = session.into_inner();
    // Unknown and malformed identifiers are indistinguishable to the caller.
    let ride_id = RideId::new(path.into_inner()).map_err(|_| Error::not_found("ride not found"))?;
    // Unparseable statuses are malformed input, refused before any lookup.
    let status = payload
        .status
        .parse::<RideStatus>()
        .map_err(|_| Error::invalid_request("invalid status"))?;

    state
        .chair_rides
        .update_status(UpdateRideStatusRequest {
            ride_id,
            chair_id: chair.id,
            status,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Deliver the oldest undelivered status of the chair's current ride, or
/// repeat the current status when nothing is pending.
#[utoipa::path(
    get,
    path = "/api/chair/notification",
    responses(
        (status = 200, description = "Notification or empty payload", body = ChairNotificationResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["chair"],
    operation_id = "chairGetNotification",
    security(("ChairSession" = []))
)]
#[get("/notification")]
pub async fn get_notification(
    state: web::Data<HttpState>,
    session: ChairSession,
) -> ApiResult<web::Json<ChairNotificationResponseBody>> {
    let chair = session.into_inner();
    let response = state
        .chair_notifications
        .next_notification(ChairNotificationRequest { chair_id: chair.id })
        .await?;

    Ok(web::Json(response.into()))
}

/// Mark the chair as available or unavailable for matching.
#[utoipa::path(
    post,
    path = "/api/chair/activity",
    request_body = UpdateChairActivityRequestBody,
    responses(
        (status = 204, description = "Activity updated"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["chair"],
    operation_id = "chairPostActivity",
    security(("ChairSession" = []))
)]
#[post("/activity")]
pub async fn post_activity(
    state: web::Data<HttpState>,
    session: ChairSession,
    payload: web::Json<UpdateChairActivityRequestBody>,
) -> ApiResult<HttpResponse> {
    let chair = session.into_inner();
    state
        .chair_activity
        .update_activity(UpdateChairActivityRequest {
            chair_id: chair.id,
            is_active: payload.is_active,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "chair_tests.rs"]
mod tests;
