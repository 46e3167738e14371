//! Domain primitives, lifecycle rules and services.
//!
//! Purpose: Define the ride dispatch vocabulary shared by the HTTP and
//! persistence layers, the pure rules governing ride status changes, and the
//! services that drive them through ports.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and stable error identifiers.
//! - Ride, Coordinate, RideStatus: the ride aggregate and its status history.
//! - chair_transition, location_transition: the lifecycle rules.
//! - Principal, AccessToken: authenticated callers.
//! - ChairRideService, AuthenticationService: port implementations.

pub mod authentication;
pub mod chair_ride_service;
pub mod error;
pub mod ids;
pub mod notification;
pub mod ports;
pub mod principal;
pub mod ride;
pub mod ride_status;
pub mod trace_id;

pub use self::authentication::AuthenticationService;
pub use self::chair_ride_service::ChairRideService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ids::{ChairId, IdValidationError, OwnerId, RideId, RiderId};
pub use self::notification::{ChairNotification, RiderSummary, NOTIFICATION_RETRY_AFTER_MS};
pub use self::principal::{
    AccessToken, Chair, EmptyAccessToken, Owner, Principal, PrincipalKind, Rider,
};
pub use self::ride::{Coordinate, Ride};
pub use self::ride_status::{
    chair_transition, location_transition, ParseRideStatusError, RideStatus,
    TransitionRejection,
};
pub use self::trace_id::TraceId;

