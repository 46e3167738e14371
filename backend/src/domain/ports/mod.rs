//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`Chair*Command`, `ChairNotificationQuery`, `Authenticator`)
//! are implemented by domain services and called by inbound adapters. Driven
//! ports (`RideRepository`, `PrincipalDirectory`, `PrincipalCache`) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod chair_activity_command;
mod chair_location_command;
mod chair_notification_query;
mod chair_ride_status_command;
mod principal_cache;
mod principal_directory;
mod ride_repository;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use chair_activity_command::MockChairActivityCommand;
pub use chair_activity_command::{ChairActivityCommand, UpdateChairActivityRequest};
#[cfg(test)]
pub use chair_location_command::MockChairLocationCommand;
pub use chair_location_command::{
    ChairLocationCommand, RecordChairLocationRequest, RecordChairLocationResponse,
};
#[cfg(test)]
pub use chair_notification_query::MockChairNotificationQuery;
pub use chair_notification_query::{
    ChairNotificationQuery, ChairNotificationRequest, ChairNotificationResponse,
};
#[cfg(test)]
pub use chair_ride_status_command::MockChairRideStatusCommand;
pub use chair_ride_status_command::{
    ChairRideStatusCommand, UpdateRideStatusRequest, UpdateRideStatusResponse,
};
#[cfg(test)]
pub use principal_cache::MockPrincipalCache;
pub use principal_cache::PrincipalCache;
#[cfg(test)]
pub use principal_directory::MockPrincipalDirectory;
pub use principal_directory::{PrincipalDirectory, PrincipalDirectoryError};
#[cfg(test)]
pub use ride_repository::MockRideRepository;
pub use ride_repository::{RecordedLocation, RideRepository, RideRepositoryError};
