//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers see a [`SessionContext`] that stores and recovers the
//! authenticated [`Principal`]; the cookie format stays an adapter concern.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal};

pub(crate) const PRINCIPAL_KEY: &str = "principal";

/// Newtype wrapper exposing principal-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `principal` for subsequent requests, rotating the session id.
    pub fn sign_in(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PRINCIPAL_KEY, principal)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the caller.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// The signed-in caller, if any.
    ///
    /// A cookie whose payload no longer decodes is treated as signed out.
    pub fn principal(&self) -> Option<Principal> {
        match self.0.get::<Principal>(PRINCIPAL_KEY) {
            Ok(principal) => principal,
            Err(error) => {
                warn!(%error, "discarding unreadable session principal");
                None
            }
        }
    }

    /// The signed-in caller or `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
