//! Authenticated principals and the access tokens that identify them.
//!
//! Tokens are issued elsewhere and are treated as immutable: once a token
//! resolves to a principal it keeps resolving to the same one, and the fields
//! carried here never change. The principal cache relies on that.

use std::fmt;

use zeroize::Zeroize;

use crate::domain::{ChairId, OwnerId, RiderId};

/// Opaque bearer token presented in a session cookie.
///
/// The secret is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

/// Raised when a session cookie carries no usable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAccessToken;

impl fmt::Display for EmptyAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("access token must not be empty")
    }
}

impl std::error::Error for EmptyAccessToken {}

impl AccessToken {
    /// Wrap a raw token, rejecting empty values.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyAccessToken> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(EmptyAccessToken);
        }
        Ok(Self(raw))
    }

    /// Borrow the secret for a backing-store lookup.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The three kinds of authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Rider,
    Chair,
    Owner,
}

impl PrincipalKind {
    /// Cookie carrying this kind's access token.
    pub const fn session_cookie(self) -> &'static str {
        match self {
            Self::Rider => "app_session",
            Self::Chair => "chair_session",
            Self::Owner => "owner_session",
        }
    }

    /// Whether resolved principals of this kind are kept in the cache.
    ///
    /// Owners always go to the backing store.
    pub const fn is_cacheable(self) -> bool {
        match self {
            Self::Rider | Self::Chair => true,
            Self::Owner => false,
        }
    }
}

/// Rider account as seen by request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    pub id: RiderId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Rider {
    /// Name shown to chairs: first and last name separated by a space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Chair (driver) as seen by request handlers.
///
/// Availability is deliberately absent: it changes at runtime and would go
/// stale in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chair {
    pub id: ChairId,
    pub owner_id: OwnerId,
    pub name: String,
    pub model: String,
}

/// Chair owner as seen by request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
}

/// Result of authenticating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Rider(Rider),
    Chair(Chair),
    Owner(Owner),
}

impl Principal {
    /// Kind of this principal.
    pub const fn kind(&self) -> PrincipalKind {
        match self {
            Self::Rider(_) => PrincipalKind::Rider,
            Self::Chair(_) => PrincipalKind::Chair,
            Self::Owner(_) => PrincipalKind::Owner,
        }
    }
}
