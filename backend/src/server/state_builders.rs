//! Builders wiring domain services to the configured storage adapters.

use std::sync::Arc;

use chair_dispatch::domain::ports::PrincipalCache;
use chair_dispatch::domain::{AuthenticationService, ChairRideService};
use chair_dispatch::inbound::http::state::HttpState;
use chair_dispatch::outbound::memory::InMemoryDispatchStore;
use chair_dispatch::outbound::persistence::{DieselPrincipalDirectory, DieselRideRepository};
use mockable::DefaultClock;
use tracing::warn;

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
///
/// `cache` is shared by every worker so a token resolves at most once per
/// process.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    cache: Arc<dyn PrincipalCache>,
) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let directory = Arc::new(DieselPrincipalDirectory::new(pool.clone()));
            let rides = Arc::new(DieselRideRepository::new(pool.clone()));
            HttpState::new(
                Arc::new(AuthenticationService::new(directory, cache)),
                Arc::new(ChairRideService::new(rides)),
            )
        }
        None => {
            warn!("no database configured; serving from an empty in-memory store");
            let store = Arc::new(InMemoryDispatchStore::new(Arc::new(DefaultClock)));
            HttpState::new(
                Arc::new(AuthenticationService::new(store.clone(), cache)),
                Arc::new(ChairRideService::new(store)),
            )
        }
    }
}
