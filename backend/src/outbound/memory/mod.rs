//! Process-local dispatch store.
//!
//! Implements the ride and principal ports over plain collections guarded by
//! a single async mutex. Every port call holds the mutex for its whole unit
//! of work, which gives the same per-ride serialisation the PostgreSQL
//! adapter gets from row locks (coarser, but never weaker). Used when no
//! database is configured and by the HTTP test-suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tokio::sync::Mutex;

use crate::domain::ports::{
    PrincipalDirectory, PrincipalDirectoryError, RecordedLocation, RideRepository,
    RideRepositoryError,
};
use crate::domain::{
    chair_transition, location_transition, AccessToken, Chair, ChairId, ChairNotification,
    Coordinate, Owner, OwnerId, Principal, PrincipalKind, Ride, RideId, RideStatus, Rider, RiderId,
    RiderSummary,
};

#[derive(Debug, Clone)]
struct StatusRow {
    seq: u64,
    ride_id: RideId,
    status: RideStatus,
    created_at: DateTime<Utc>,
    chair_sent_at: Option<DateTime<Utc>>,
}

impl StatusRow {
    fn order_key(&self) -> (DateTime<Utc>, u64) {
        (self.created_at, self.seq)
    }
}

#[derive(Debug, Clone)]
struct LocationRow {
    chair_id: ChairId,
    position: Coordinate,
}

#[derive(Debug)]
struct ChairRecord {
    chair: Chair,
    token: AccessToken,
    is_active: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    riders: HashMap<RiderId, (Rider, AccessToken)>,
    chairs: HashMap<ChairId, ChairRecord>,
    owners: HashMap<OwnerId, (Owner, AccessToken)>,
    rides: HashMap<RideId, Ride>,
    statuses: Vec<StatusRow>,
    locations: Vec<LocationRow>,
    next_seq: u64,
}

impl StoreState {
    fn current_status_row(&self, ride_id: &RideId) -> Option<&StatusRow> {
        self.statuses
            .iter()
            .filter(|row| row.ride_id == *ride_id)
            .max_by_key(|row| row.order_key())
    }

    fn current_status(&self, ride_id: &RideId) -> Option<RideStatus> {
        self.current_status_row(ride_id).map(|row| row.status)
    }

    /// Most recently updated ride of the chair. Ties go to the ride with the
    /// newest status row; rides without history lose them.
    fn latest_ride_for(&self, chair_id: &ChairId) -> Option<Ride> {
        self.rides
            .values()
            .filter(|ride| ride.is_assigned_to(chair_id))
            .max_by_key(|ride| {
                let newest_status = self.current_status_row(&ride.id).map(StatusRow::order_key);
                (ride.updated_at, newest_status, ride.created_at)
            })
            .cloned()
    }

    fn append_status(&mut self, ride_id: RideId, status: RideStatus, now: DateTime<Utc>) {
        self.next_seq += 1;
        self.statuses.push(StatusRow {
            seq: self.next_seq,
            ride_id,
            status,
            created_at: now,
            chair_sent_at: None,
        });
    }
}

/// In-memory implementation of [`RideRepository`] and [`PrincipalDirectory`].
pub struct InMemoryDispatchStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryDispatchStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// Register a rider reachable through `token`.
    pub async fn insert_rider(&self, rider: Rider, token: AccessToken) {
        let mut state = self.state.lock().await;
        state.riders.insert(rider.id, (rider, token));
    }

    /// Register an inactive chair reachable through `token`.
    pub async fn insert_chair(&self, chair: Chair, token: AccessToken) {
        let mut state = self.state.lock().await;
        state.chairs.insert(
            chair.id,
            ChairRecord {
                chair,
                token,
                is_active: false,
            },
        );
    }

    /// Register an owner reachable through `token`.
    pub async fn insert_owner(&self, owner: Owner, token: AccessToken) {
        let mut state = self.state.lock().await;
        state.owners.insert(owner.id, (owner, token));
    }

    /// Store or replace a ride.
    pub async fn insert_ride(&self, ride: Ride) {
        let mut state = self.state.lock().await;
        state.rides.insert(ride.id, ride);
    }

    /// Append an undelivered status row, as the matching and payment flows
    /// would.
    pub async fn append_status(&self, ride_id: RideId, status: RideStatus) {
        let now = self.clock.utc();
        let mut state = self.state.lock().await;
        state.append_status(ride_id, status, now);
    }

    /// Status history of `ride_id` in append order, paired with whether each
    /// entry has been delivered to the chair.
    pub async fn status_history(&self, ride_id: &RideId) -> Vec<(RideStatus, bool)> {
        let state = self.state.lock().await;
        let mut rows: Vec<&StatusRow> = state
            .statuses
            .iter()
            .filter(|row| row.ride_id == *ride_id)
            .collect();
        rows.sort_by_key(|row| row.order_key());
        rows.into_iter()
            .map(|row| (row.status, row.chair_sent_at.is_some()))
            .collect()
    }

    /// Locations reported by `chair_id`, oldest first.
    pub async fn locations(&self, chair_id: &ChairId) -> Vec<Coordinate> {
        let state = self.state.lock().await;
        state
            .locations
            .iter()
            .filter(|row| row.chair_id == *chair_id)
            .map(|row| row.position)
            .collect()
    }

    /// Availability flag of `chair_id`, if the chair exists.
    pub async fn chair_is_active(&self, chair_id: &ChairId) -> Option<bool> {
        let state = self.state.lock().await;
        state.chairs.get(chair_id).map(|record| record.is_active)
    }
}

#[async_trait]
impl RideRepository for InMemoryDispatchStore {
    async fn record_location(
        &self,
        chair_id: &ChairId,
        position: Coordinate,
    ) -> Result<RecordedLocation, RideRepositoryError> {
        let mut state = self.state.lock().await;
        let recorded_at = self.clock.utc();
        state.locations.push(LocationRow {
            chair_id: *chair_id,
            position,
        });

        let Some(ride) = state.latest_ride_for(chair_id) else {
            return Ok(RecordedLocation {
                recorded_at,
                ride_id: None,
                appended: None,
            });
        };

        let current = state.current_status(&ride.id);
        let appended = location_transition(&ride, current, position);
        if let Some(next) = appended {
            state.append_status(ride.id, next, recorded_at);
        }

        Ok(RecordedLocation {
            recorded_at,
            ride_id: Some(ride.id),
            appended,
        })
    }

    async fn apply_chair_status(
        &self,
        ride_id: &RideId,
        chair_id: &ChairId,
        requested: RideStatus,
    ) -> Result<RideStatus, RideRepositoryError> {
        let mut state = self.state.lock().await;
        let ride = state
            .rides
            .get(ride_id)
            .ok_or_else(|| RideRepositoryError::ride_not_found(*ride_id))?;
        if !ride.is_assigned_to(chair_id) {
            return Err(RideRepositoryError::not_assigned(*ride_id, *chair_id));
        }

        let next = chair_transition(state.current_status(ride_id), requested)
            .map_err(RideRepositoryError::transition)?;
        let now = self.clock.utc();
        state.append_status(*ride_id, next, now);
        Ok(next)
    }

    async fn claim_notification(
        &self,
        chair_id: &ChairId,
    ) -> Result<Option<ChairNotification>, RideRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(ride) = state.latest_ride_for(chair_id) else {
            return Ok(None);
        };

        // Every fallible read happens before the delivery mark so a failed
        // poll leaves the history untouched.
        let rider = state
            .riders
            .get(&ride.rider_id)
            .map(|(rider, _)| RiderSummary {
                id: rider.id,
                name: rider.display_name(),
            })
            .ok_or_else(|| {
                RideRepositoryError::query(format!("rider {} not found", ride.rider_id))
            })?;

        let pending = state
            .statuses
            .iter()
            .enumerate()
            .filter(|(_, row)| row.ride_id == ride.id && row.chair_sent_at.is_none())
            .min_by_key(|(_, row)| row.order_key())
            .map(|(index, _)| index);
        let (status, newly_delivered) = match pending {
            Some(index) => {
                let now = self.clock.utc();
                let row = &mut state.statuses[index];
                row.chair_sent_at = Some(now);
                (row.status, true)
            }
            None => {
                let status = state.current_status(&ride.id).ok_or_else(|| {
                    RideRepositoryError::query(format!("ride {} has no status history", ride.id))
                })?;
                (status, false)
            }
        };

        Ok(Some(ChairNotification {
            ride_id: ride.id,
            rider,
            pickup: ride.pickup,
            destination: ride.destination,
            status,
            newly_delivered,
        }))
    }

    async fn set_chair_activity(
        &self,
        chair_id: &ChairId,
        is_active: bool,
    ) -> Result<(), RideRepositoryError> {
        let mut state = self.state.lock().await;
        if let Some(record) = state.chairs.get_mut(chair_id) {
            record.is_active = is_active;
        }
        Ok(())
    }
}

#[async_trait]
impl PrincipalDirectory for InMemoryDispatchStore {
    async fn find_by_token(
        &self,
        kind: PrincipalKind,
        token: &AccessToken,
    ) -> Result<Option<Principal>, PrincipalDirectoryError> {
        let state = self.state.lock().await;
        let principal = match kind {
            PrincipalKind::Rider => state
                .riders
                .values()
                .find(|(_, stored)| stored == token)
                .map(|(rider, _)| Principal::Rider(rider.clone())),
            PrincipalKind::Chair => state
                .chairs
                .values()
                .find(|record| record.token == *token)
                .map(|record| Principal::Chair(record.chair.clone())),
            PrincipalKind::Owner => state
                .owners
                .values()
                .find(|(_, stored)| stored == token)
                .map(|(owner, _)| Principal::Owner(owner.clone())),
        };
        Ok(principal)
    }
}
