//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use chrono::Utc;
use mockable::DefaultClock;

use crate::domain::{
    AccessToken, AuthenticationService, Chair, ChairId, ChairRideService, Coordinate, Owner,
    OwnerId, PrincipalKind, Ride, RideId, RideStatus, Rider, RiderId,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::InMemoryPrincipalCache;
use crate::outbound::memory::InMemoryDispatchStore;

pub const RIDER_TOKEN: &str = "rider-token";
pub const CHAIR_TOKEN: &str = "chair-token";
pub const OWNER_TOKEN: &str = "owner-token";

/// In-memory world with one owner, one chair, one rider and (optionally) a
/// ride assigned to the chair.
pub struct Fixture {
    pub store: Arc<InMemoryDispatchStore>,
    pub cache: Arc<InMemoryPrincipalCache>,
    pub state: HttpState,
    pub chair_id: ChairId,
    pub rider_id: RiderId,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryDispatchStore::new(Arc::new(DefaultClock)));
        let cache = Arc::new(InMemoryPrincipalCache::new());
        let owner = Owner {
            id: OwnerId::random(),
            name: "owner-1".to_owned(),
        };
        let chair = Chair {
            id: ChairId::random(),
            owner_id: owner.id,
            name: "chair-1".to_owned(),
            model: "Model A".to_owned(),
        };
        let rider = Rider {
            id: RiderId::random(),
            username: "hanako".to_owned(),
            first_name: "Hanako".to_owned(),
            last_name: "Yamada".to_owned(),
        };
        let (chair_id, rider_id) = (chair.id, rider.id);

        store.insert_owner(owner, token(OWNER_TOKEN)).await;
        store.insert_chair(chair, token(CHAIR_TOKEN)).await;
        store.insert_rider(rider, token(RIDER_TOKEN)).await;

        let authenticator = Arc::new(AuthenticationService::new(store.clone(), cache.clone()));
        let state = HttpState::new(authenticator, Arc::new(ChairRideService::new(store.clone())));

        Self {
            store,
            cache,
            state,
            chair_id,
            rider_id,
        }
    }

    /// Assign a ride from (10,10) to (20,20) to the chair and seed its history.
    pub async fn assign_ride(&self, history: &[RideStatus]) -> RideId {
        let now = Utc::now();
        let ride = Ride {
            id: RideId::random(),
            rider_id: self.rider_id,
            chair_id: Some(self.chair_id),
            pickup: Coordinate::new(10, 10),
            destination: Coordinate::new(20, 20),
            created_at: now,
            updated_at: now,
        };
        let ride_id = ride.id;
        self.store.insert_ride(ride).await;
        for status in history {
            self.store.append_status(ride_id, *status).await;
        }
        ride_id
    }
}

pub fn token(raw: &str) -> AccessToken {
    AccessToken::new(raw).expect("non-empty token")
}

/// Session cookie for `kind` carrying `value`.
pub fn session_cookie(kind: PrincipalKind, value: &str) -> Cookie<'static> {
    Cookie::new(kind.session_cookie(), value.to_owned())
}
