//! Driving port resolving session tokens into principals.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Principal, PrincipalKind};

/// Request authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve `token` to a principal of `kind`.
    ///
    /// Unknown tokens yield `Unauthorized`; backing-store failures yield
    /// `InternalError`.
    async fn authenticate(
        &self,
        kind: PrincipalKind,
        token: AccessToken,
    ) -> Result<Principal, Error>;
}
