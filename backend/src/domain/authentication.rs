//! Session token authentication backed by a principal cache.
//!
//! Rider and chair lookups go through the cache first and populate it on a
//! hit in the directory. Owner lookups always reach the directory. Unknown
//! tokens are never cached.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{
    Authenticator, PrincipalCache, PrincipalDirectory, PrincipalDirectoryError,
};
use crate::domain::{AccessToken, Error, Principal, PrincipalKind};

/// [`Authenticator`] implementation over a directory and a cache.
#[derive(Clone)]
pub struct AuthenticationService<D> {
    directory: Arc<D>,
    cache: Arc<dyn PrincipalCache>,
}

impl<D> AuthenticationService<D> {
    /// Create a new service.
    pub fn new(directory: Arc<D>, cache: Arc<dyn PrincipalCache>) -> Self {
        Self { directory, cache }
    }
}

fn map_directory_error(error: PrincipalDirectoryError) -> Error {
    error!(error = %error, "principal directory failure");
    Error::internal(format!("principal directory error: {error}"))
}

#[async_trait]
impl<D> Authenticator for AuthenticationService<D>
where
    D: PrincipalDirectory,
{
    async fn authenticate(
        &self,
        kind: PrincipalKind,
        token: AccessToken,
    ) -> Result<Principal, Error> {
        if kind.is_cacheable() {
            if let Some(principal) = self.cache.get(kind, &token) {
                return Ok(principal);
            }
        }

        let principal = self
            .directory
            .find_by_token(kind, &token)
            .await
            .map_err(map_directory_error)?
            .filter(|principal| principal.kind() == kind)
            .ok_or_else(|| Error::unauthorized("invalid access token"))?;

        if kind.is_cacheable() {
            self.cache.put(token, principal.clone());
        }
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockPrincipalCache, MockPrincipalDirectory};
    use crate::domain::{Chair, ChairId, ErrorCode, Owner, OwnerId, Rider, RiderId};

    fn token(raw: &str) -> AccessToken {
        AccessToken::new(raw).expect("non-empty token")
    }

    fn chair() -> Principal {
        Principal::Chair(Chair {
            id: ChairId::random(),
            owner_id: OwnerId::random(),
            name: "chair-1".to_owned(),
            model: "Model A".to_owned(),
        })
    }

    fn rider() -> Principal {
        Principal::Rider(Rider {
            id: RiderId::random(),
            username: "hanako".to_owned(),
            first_name: "Hanako".to_owned(),
            last_name: "Yamada".to_owned(),
        })
    }

    fn owner() -> Principal {
        Principal::Owner(Owner {
            id: OwnerId::random(),
            name: "owner-1".to_owned(),
        })
    }

    fn make_service(
        directory: MockPrincipalDirectory,
        cache: MockPrincipalCache,
    ) -> AuthenticationService<MockPrincipalDirectory> {
        AuthenticationService::new(Arc::new(directory), Arc::new(cache))
    }

    #[tokio::test]
    async fn cache_hit_skips_the_directory() {
        let cached = chair();
        let returned = cached.clone();
        let mut cache = MockPrincipalCache::new();
        cache
            .expect_get()
            .with(eq(PrincipalKind::Chair), eq(token("chair-token")))
            .times(1)
            .return_once(move |_, _| Some(returned));
        cache.expect_put().never();
        let mut directory = MockPrincipalDirectory::new();
        directory.expect_find_by_token().never();

        let principal = make_service(directory, cache)
            .authenticate(PrincipalKind::Chair, token("chair-token"))
            .await
            .expect("cached principal");

        assert_eq!(principal, cached);
    }

    #[rstest]
    #[case::rider(PrincipalKind::Rider, rider())]
    #[case::chair(PrincipalKind::Chair, chair())]
    #[tokio::test]
    async fn cache_miss_populates_the_cache(
        #[case] kind: PrincipalKind,
        #[case] expected: Principal,
    ) {
        let stored = expected.clone();
        let cached = expected.clone();
        let mut cache = MockPrincipalCache::new();
        cache.expect_get().times(1).return_const(None);
        cache
            .expect_put()
            .withf(move |tok, principal| tok.expose() == "token" && *principal == cached)
            .times(1)
            .return_const(());
        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_by_token()
            .withf(move |k, tok| *k == kind && tok.expose() == "token")
            .times(1)
            .return_once(move |_, _| Ok(Some(stored)));

        let principal = make_service(directory, cache)
            .authenticate(kind, token("token"))
            .await
            .expect("directory principal");

        assert_eq!(principal, expected);
    }

    #[tokio::test]
    async fn owners_bypass_the_cache() {
        let expected = owner();
        let stored = expected.clone();
        let mut cache = MockPrincipalCache::new();
        cache.expect_get().never();
        cache.expect_put().never();
        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_by_token()
            .times(2)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let service = make_service(directory, cache);
        for _ in 0..2 {
            let principal = service
                .authenticate(PrincipalKind::Owner, token("owner-token"))
                .await
                .expect("owner principal");
            assert_eq!(principal, expected);
        }
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorised_and_not_cached() {
        let mut cache = MockPrincipalCache::new();
        cache.expect_get().times(1).return_const(None);
        cache.expect_put().never();
        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_by_token()
            .times(1)
            .return_once(|_, _| Ok(None));

        let error = make_service(directory, cache)
            .authenticate(PrincipalKind::Chair, token("stale"))
            .await
            .expect_err("unknown token");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid access token");
    }

    #[tokio::test]
    async fn directory_failure_is_internal() {
        let mut cache = MockPrincipalCache::new();
        cache.expect_get().times(1).return_const(None);
        cache.expect_put().never();
        let mut directory = MockPrincipalDirectory::new();
        directory
            .expect_find_by_token()
            .times(1)
            .return_once(|_, _| Err(PrincipalDirectoryError::connection("refused")));

        let error = make_service(directory, cache)
            .authenticate(PrincipalKind::Rider, token("token"))
            .await
            .expect_err("directory failure");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
