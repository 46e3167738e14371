//! Session cookie authentication for handlers.
//!
//! Each principal kind reads its own cookie. Handlers name the principal they
//! need in their signature, e.g. `ChairSession`, and receive the resolved
//! [`Chair`] or a `401` before the handler body runs.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::domain::{AccessToken, Chair, Error, Owner, Principal, PrincipalKind, Rider};
use crate::inbound::http::state::HttpState;

/// A principal type that a session cookie can resolve to.
pub trait SessionPrincipal: Sized {
    const KIND: PrincipalKind;

    /// Unwrap the matching variant.
    fn from_principal(principal: Principal) -> Option<Self>;
}

impl SessionPrincipal for Rider {
    const KIND: PrincipalKind = PrincipalKind::Rider;

    fn from_principal(principal: Principal) -> Option<Self> {
        match principal {
            Principal::Rider(rider) => Some(rider),
            _ => None,
        }
    }
}

impl SessionPrincipal for Chair {
    const KIND: PrincipalKind = PrincipalKind::Chair;

    fn from_principal(principal: Principal) -> Option<Self> {
        match principal {
            Principal::Chair(chair) => Some(chair),
            _ => None,
        }
    }
}

impl SessionPrincipal for Owner {
    const KIND: PrincipalKind = PrincipalKind::Owner;

    fn from_principal(principal: Principal) -> Option<Self> {
        match principal {
            Principal::Owner(owner) => Some(owner),
            _ => None,
        }
    }
}

/// Extractor resolving the session cookie of `P` into `P`.
#[derive(Debug, Clone)]
pub struct Authenticated<P>(pub P);

impl<P> Authenticated<P> {
    pub fn into_inner(self) -> P {
        self.0
    }
}

/// Authenticated rider (`app_session` cookie).
pub type RiderSession = Authenticated<Rider>;
/// Authenticated chair (`chair_session` cookie).
pub type ChairSession = Authenticated<Chair>;
/// Authenticated owner (`owner_session` cookie).
pub type OwnerSession = Authenticated<Owner>;

impl<P> FromRequest for Authenticated<P>
where
    P: SessionPrincipal + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let cookie_name = P::KIND.session_cookie();
        let token = req
            .cookie(cookie_name)
            .and_then(|cookie| AccessToken::new(cookie.value()).ok());
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let token =
                token.ok_or_else(|| Error::unauthorized(format!("{cookie_name} cookie is required")))?;
            let state = state.ok_or_else(|| {
                error!("HttpState missing from app data");
                Error::internal("authentication is not configured")
            })?;

            let principal = state.authenticator.authenticate(P::KIND, token).await?;
            P::from_principal(principal).map(Authenticated).ok_or_else(|| {
                error!(kind = ?P::KIND, "authenticator returned a principal of another kind");
                Error::internal("authentication returned an unexpected principal")
            })
        })
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
