//! Diesel and pool error mapping shared by the repositories.
//!
//! Database detail is logged at debug level and replaced by a fixed message,
//! so nothing from the driver reaches an API response.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map a Diesel failure to a query or connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            query("concurrent update conflict")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::RideRepositoryError;

    fn map(error: DieselError) -> RideRepositoryError {
        map_basic_diesel_error(
            error,
            RideRepositoryError::query,
            RideRepositoryError::connection,
        )
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        assert_eq!(
            map(DieselError::NotFound),
            RideRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(
            map(error),
            RideRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn pool_failures_keep_their_message() {
        let mapped: RideRepositoryError = map_basic_pool_error(
            PoolError::checkout("timed out"),
            RideRepositoryError::connection,
        );
        assert_eq!(mapped, RideRepositoryError::connection("timed out"));
    }
}
