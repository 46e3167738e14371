//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised against mocks without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, ChairActivityCommand, ChairLocationCommand, ChairNotificationQuery,
    ChairRideStatusCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authenticator: Arc<dyn Authenticator>,
    pub chair_locations: Arc<dyn ChairLocationCommand>,
    pub chair_rides: Arc<dyn ChairRideStatusCommand>,
    pub chair_notifications: Arc<dyn ChairNotificationQuery>,
    pub chair_activity: Arc<dyn ChairActivityCommand>,
}

impl HttpState {
    /// Build state from an authenticator and one service implementing every
    /// chair port.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use chair_dispatch::domain::{AuthenticationService, ChairRideService};
    /// use chair_dispatch::inbound::http::state::HttpState;
    /// use chair_dispatch::outbound::cache::InMemoryPrincipalCache;
    /// use chair_dispatch::outbound::memory::InMemoryDispatchStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryDispatchStore::new(Arc::new(DefaultClock)));
    /// let authenticator = Arc::new(AuthenticationService::new(
    ///     store.clone(),
    ///     Arc::new(InMemoryPrincipalCache::new()),
    /// ));
    /// let state = HttpState::new(authenticator, Arc::new(ChairRideService::new(store)));
    /// let _auth = state.authenticator.clone();
    /// ```
    pub fn new<S>(authenticator: Arc<dyn Authenticator>, chair_service: Arc<S>) -> Self
    where
        S: ChairLocationCommand
            + ChairRideStatusCommand
            + ChairNotificationQuery
            + ChairActivityCommand
            + 'static,
    {
        Self {
            authenticator,
            chair_locations: chair_service.clone(),
            chair_rides: chair_service.clone(),
            chair_notifications: chair_service.clone(),
            chair_activity: chair_service,
        }
    }
}
