//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Chair, ChairId, Coordinate, Owner, OwnerId, Ride, RideId, Rider, RiderId,
};

use super::schema::{chair_locations, chairs, owners, ride_statuses, rides, users};

/// Row struct for reading from the rides table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rides)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RideRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub chair_id: Option<Uuid>,
    pub pickup_latitude: i32,
    pub pickup_longitude: i32,
    pub destination_latitude: i32,
    pub destination_longitude: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RideRow> for Ride {
    fn from(row: RideRow) -> Self {
        Self {
            id: RideId::from_uuid(row.id),
            rider_id: RiderId::from_uuid(row.user_id),
            chair_id: row.chair_id.map(ChairId::from_uuid),
            pickup: Coordinate::new(row.pickup_latitude, row.pickup_longitude),
            destination: Coordinate::new(row.destination_latitude, row.destination_longitude),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for appending to the status history.
///
/// `created_at` and `seq` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ride_statuses)]
pub(crate) struct NewRideStatusRow<'a> {
    pub id: Uuid,
    pub ride_id: Uuid,
    pub status: &'a str,
}

/// Pending or current status row as read by the notification poll.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ride_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RideStatusRow {
    pub id: Uuid,
    pub status: String,
}

/// Insertable struct for the chair location log.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = chair_locations)]
pub(crate) struct NewChairLocationRow {
    pub id: Uuid,
    pub chair_id: Uuid,
    pub latitude: i32,
    pub longitude: i32,
}

// ---------------------------------------------------------------------------
// Principal models
// ---------------------------------------------------------------------------

/// Public rider profile.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RiderRow {
    pub id: Uuid,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

impl From<RiderRow> for Rider {
    fn from(row: RiderRow) -> Self {
        Self {
            id: RiderId::from_uuid(row.id),
            username: row.username,
            first_name: row.firstname,
            last_name: row.lastname,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = chairs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ChairRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub model: String,
}

impl From<ChairRow> for Chair {
    fn from(row: ChairRow) -> Self {
        Self {
            id: ChairId::from_uuid(row.id),
            owner_id: OwnerId::from_uuid(row.owner_id),
            name: row.name,
            model: row.model,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnerRow {
    pub id: Uuid,
    pub name: String,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Self {
            id: OwnerId::from_uuid(row.id),
            name: row.name,
        }
    }
}
