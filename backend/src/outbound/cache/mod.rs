//! In-process principal cache.
//!
//! A sharded concurrent map keyed by principal kind and access token. Reads
//! never block writers on other shards, and concurrent first lookups of the
//! same token keep whichever principal was stored first.

use dashmap::DashMap;

use crate::domain::ports::PrincipalCache;
use crate::domain::{AccessToken, Principal, PrincipalKind};

/// Unbounded, non-expiring [`PrincipalCache`] backed by [`DashMap`].
#[derive(Debug, Default)]
pub struct InMemoryPrincipalCache {
    entries: DashMap<(PrincipalKind, AccessToken), Principal>,
}

impl InMemoryPrincipalCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached principals across all kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PrincipalCache for InMemoryPrincipalCache {
    fn get(&self, kind: PrincipalKind, token: &AccessToken) -> Option<Principal> {
        self.entries
            .get(&(kind, token.clone()))
            .map(|entry| entry.value().clone())
    }

    fn put(&self, token: AccessToken, principal: Principal) {
        self.entries
            .entry((principal.kind(), token))
            .or_insert(principal);
    }

    fn invalidate(&self, kind: PrincipalKind, token: &AccessToken) -> bool {
        self.entries.remove(&(kind, token.clone())).is_some()
    }
}
