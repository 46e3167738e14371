//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and own the
//! transaction boundaries; lifecycle decisions are delegated to
//! [`crate::domain::chair_transition`] and
//! [`crate::domain::location_transition`] while the ride row is locked.
//!
//! ```ignore
//! use chair_dispatch::outbound::persistence::{DbPool, DieselRideRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/dispatch")).await?;
//! let rides = DieselRideRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_principal_directory;
mod diesel_ride_repository;
mod models;
mod pool;
mod schema;

pub use diesel_principal_directory::DieselPrincipalDirectory;
pub use diesel_ride_repository::DieselRideRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
