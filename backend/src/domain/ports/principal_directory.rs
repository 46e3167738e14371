//! Port resolving access tokens against the account store.

use async_trait::async_trait;

use crate::domain::{AccessToken, Principal, PrincipalKind};

use super::define_port_error;

define_port_error! {
    /// Errors raised by principal directory adapters.
    pub enum PrincipalDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "principal directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "principal directory query failed: {message}",
    }
}

/// Backing store for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Find the principal of `kind` owning `token`.
    async fn find_by_token(
        &self,
        kind: PrincipalKind,
        token: &AccessToken,
    ) -> Result<Option<Principal>, PrincipalDirectoryError>;
}
