//! PostgreSQL-backed `RideRepository` implementation using Diesel ORM.
//!
//! Each port call is one transaction. The ride row is taken `FOR UPDATE`
//! before its status history is read, so concurrent appends and delivery
//! marks for the same ride queue behind each other. Riders are read
//! `FOR SHARE` while a notification is assembled.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Timestamptz;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RecordedLocation, RideRepository, RideRepositoryError};
use crate::domain::{
    chair_transition, location_transition, ChairId, ChairNotification, Coordinate, Ride, RideId,
    RideStatus, Rider, RiderSummary,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewChairLocationRow, NewRideStatusRow, RideRow, RideStatusRow, RiderRow};
use super::pool::{DbPool, PoolError};
use super::schema::{chair_locations, chairs, ride_statuses, rides, users};

/// Diesel-backed implementation of the ride repository port.
#[derive(Clone)]
pub struct DieselRideRepository {
    pool: DbPool,
}

impl DieselRideRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a ride transaction: either the database gave up or a rule
/// refused the change. Both roll the transaction back.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    Rejected(RideRepositoryError),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<RideRepositoryError> for TxError {
    fn from(error: RideRepositoryError) -> Self {
        Self::Rejected(error)
    }
}

fn map_pool_error(error: PoolError) -> RideRepositoryError {
    map_basic_pool_error(error, RideRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RideRepositoryError {
    map_basic_diesel_error(
        error,
        RideRepositoryError::query,
        RideRepositoryError::connection,
    )
}

fn map_tx_error(error: TxError) -> RideRepositoryError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::Rejected(error) => error,
    }
}

fn parse_status(raw: &str) -> Result<RideStatus, TxError> {
    raw.parse::<RideStatus>()
        .map_err(|err| TxError::Rejected(RideRepositoryError::query(err.to_string())))
}

/// Creation time of the ride's newest status row, `-infinity` without history.
///
/// Diesel cannot type a subquery correlated with the outer `rides` row, so
/// this ordering key stays a SQL fragment.
const NEWEST_STATUS_AT: &str = "COALESCE((SELECT MAX(ride_statuses.created_at) \
     FROM ride_statuses WHERE ride_statuses.ride_id = rides.id), '-infinity'::timestamptz)";

/// Lock and return the chair's most recently updated ride. Rides updated at
/// the same instant are told apart by their newest status row.
async fn lock_latest_ride(
    conn: &mut AsyncPgConnection,
    chair_id: Uuid,
) -> QueryResult<Option<Ride>> {
    rides::table
        .filter(rides::chair_id.eq(chair_id))
        .order((
            rides::updated_at.desc(),
            sql::<Timestamptz>(NEWEST_STATUS_AT).desc(),
            rides::created_at.desc(),
        ))
        .select(RideRow::as_select())
        .for_update()
        .first::<RideRow>(conn)
        .await
        .optional()
        .map(|row| row.map(Ride::from))
}

/// Latest status of a ride; callers must hold the ride lock.
async fn current_status(
    conn: &mut AsyncPgConnection,
    ride_id: Uuid,
) -> Result<Option<RideStatus>, TxError> {
    let raw: Option<String> = ride_statuses::table
        .filter(ride_statuses::ride_id.eq(ride_id))
        .order((ride_statuses::created_at.desc(), ride_statuses::seq.desc()))
        .select(ride_statuses::status)
        .first(conn)
        .await
        .optional()?;
    raw.as_deref().map(parse_status).transpose()
}

async fn append_status(
    conn: &mut AsyncPgConnection,
    ride_id: Uuid,
    status: RideStatus,
) -> QueryResult<()> {
    diesel::insert_into(ride_statuses::table)
        .values(&NewRideStatusRow {
            id: Uuid::new_v4(),
            ride_id,
            status: status.as_str(),
        })
        .execute(conn)
        .await
        .map(|_| ())
}

#[async_trait]
impl RideRepository for DieselRideRepository {
    async fn record_location(
        &self,
        chair_id: &ChairId,
        position: Coordinate,
    ) -> Result<RecordedLocation, RideRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let chair_uuid = *chair_id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let recorded_at: DateTime<Utc> = diesel::insert_into(chair_locations::table)
                    .values(&NewChairLocationRow {
                        id: Uuid::new_v4(),
                        chair_id: chair_uuid,
                        latitude: position.latitude,
                        longitude: position.longitude,
                    })
                    .returning(chair_locations::created_at)
                    .get_result(conn)
                    .await?;

                let Some(ride) = lock_latest_ride(conn, chair_uuid).await? else {
                    return Ok(RecordedLocation {
                        recorded_at,
                        ride_id: None,
                        appended: None,
                    });
                };

                let current = current_status(conn, *ride.id.as_uuid()).await?;
                let appended = location_transition(&ride, current, position);
                if let Some(next) = appended {
                    append_status(conn, *ride.id.as_uuid(), next).await?;
                }

                Ok::<_, TxError>(RecordedLocation {
                    recorded_at,
                    ride_id: Some(ride.id),
                    appended,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn apply_chair_status(
        &self,
        ride_id: &RideId,
        chair_id: &ChairId,
        requested: RideStatus,
    ) -> Result<RideStatus, RideRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (ride_id, chair_id) = (*ride_id, *chair_id);

        conn.transaction(|conn| {
            async move {
                let ride = rides::table
                    .find(*ride_id.as_uuid())
                    .select(RideRow::as_select())
                    .for_update()
                    .first::<RideRow>(conn)
                    .await
                    .optional()?
                    .map(Ride::from)
                    .ok_or(RideRepositoryError::ride_not_found(ride_id))?;
                if !ride.is_assigned_to(&chair_id) {
                    return Err(RideRepositoryError::not_assigned(ride_id, chair_id).into());
                }

                let current = current_status(conn, *ride_id.as_uuid()).await?;
                let next =
                    chair_transition(current, requested).map_err(RideRepositoryError::transition)?;
                append_status(conn, *ride_id.as_uuid(), next).await?;
                Ok::<_, TxError>(next)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn claim_notification(
        &self,
        chair_id: &ChairId,
    ) -> Result<Option<ChairNotification>, RideRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let chair_uuid = *chair_id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let Some(ride) = lock_latest_ride(conn, chair_uuid).await? else {
                    return Ok(None);
                };
                let ride_uuid = *ride.id.as_uuid();

                let pending: Option<RideStatusRow> = ride_statuses::table
                    .filter(ride_statuses::ride_id.eq(ride_uuid))
                    .filter(ride_statuses::chair_sent_at.is_null())
                    .order((ride_statuses::created_at.asc(), ride_statuses::seq.asc()))
                    .select(RideStatusRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;

                let (status, newly_delivered) = match pending {
                    Some(row) => {
                        let status = parse_status(&row.status)?;
                        diesel::update(ride_statuses::table.find(row.id))
                            .set(ride_statuses::chair_sent_at.eq(Some(Utc::now())))
                            .execute(conn)
                            .await?;
                        (status, true)
                    }
                    None => {
                        let status = current_status(conn, ride_uuid).await?.ok_or_else(|| {
                            RideRepositoryError::query(format!(
                                "ride {} has no status history",
                                ride.id
                            ))
                        })?;
                        (status, false)
                    }
                };

                let rider: Rider = users::table
                    .find(*ride.rider_id.as_uuid())
                    .select(RiderRow::as_select())
                    .for_share()
                    .first::<RiderRow>(conn)
                    .await?
                    .into();

                if newly_delivered {
                    debug!(ride_id = %ride.id, %status, "marked ride status as sent to chair");
                }

                Ok::<_, TxError>(Some(ChairNotification {
                    ride_id: ride.id,
                    rider: RiderSummary {
                        id: rider.id,
                        name: rider.display_name(),
                    },
                    pickup: ride.pickup,
                    destination: ride.destination,
                    status,
                    newly_delivered,
                }))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn set_chair_activity(
        &self,
        chair_id: &ChairId,
        is_active: bool,
    ) -> Result<(), RideRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(chairs::table.find(*chair_id.as_uuid()))
            .set((
                chairs::is_active.eq(is_active),
                chairs::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
