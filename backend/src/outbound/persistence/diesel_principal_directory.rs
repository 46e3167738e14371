//! PostgreSQL-backed `PrincipalDirectory` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PrincipalDirectory, PrincipalDirectoryError};
use crate::domain::{AccessToken, Principal, PrincipalKind};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ChairRow, OwnerRow, RiderRow};
use super::pool::{DbPool, PoolError};
use super::schema::{chairs, owners, users};

/// Diesel-backed token lookup across riders, chairs and owners.
#[derive(Clone)]
pub struct DieselPrincipalDirectory {
    pool: DbPool,
}

impl DieselPrincipalDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PrincipalDirectoryError {
    map_basic_pool_error(error, PrincipalDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PrincipalDirectoryError {
    map_basic_diesel_error(
        error,
        PrincipalDirectoryError::query,
        PrincipalDirectoryError::connection,
    )
}

#[async_trait]
impl PrincipalDirectory for DieselPrincipalDirectory {
    async fn find_by_token(
        &self,
        kind: PrincipalKind,
        token: &AccessToken,
    ) -> Result<Option<Principal>, PrincipalDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw = token.expose();

        let principal = match kind {
            PrincipalKind::Rider => users::table
                .filter(users::access_token.eq(raw))
                .select(RiderRow::as_select())
                .first::<RiderRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(|row| Principal::Rider(row.into()))),
            PrincipalKind::Chair => chairs::table
                .filter(chairs::access_token.eq(raw))
                .select(ChairRow::as_select())
                .first::<ChairRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(|row| Principal::Chair(row.into()))),
            PrincipalKind::Owner => owners::table
                .filter(owners::access_token.eq(raw))
                .select(OwnerRow::as_select())
                .first::<OwnerRow>(&mut conn)
                .await
                .optional()
                .map(|row| row.map(|row| Principal::Owner(row.into()))),
        };

        principal.map_err(map_diesel_error)
    }
}
