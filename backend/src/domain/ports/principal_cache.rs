//! Port for the process-wide principal cache.
//!
//! Entries never expire. This is only sound because tokens are never
//! reassigned and the cached principal fields never change; anything that
//! breaks that must call [`PrincipalCache::invalidate`].

use crate::domain::{AccessToken, Principal, PrincipalKind};

/// Token to principal lookup table, partitioned by principal kind.
///
/// Implementations must not block on I/O.
#[cfg_attr(test, mockall::automock)]
pub trait PrincipalCache: Send + Sync {
    /// Read the cached principal of `kind` for `token`.
    fn get(&self, kind: PrincipalKind, token: &AccessToken) -> Option<Principal>;

    /// Store `principal` under `token` unless an entry already exists.
    fn put(&self, token: AccessToken, principal: Principal);

    /// Drop the entry for `token`; returns whether one was present.
    fn invalidate(&self, kind: PrincipalKind, token: &AccessToken) -> bool;
}
