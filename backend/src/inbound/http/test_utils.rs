//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::ListingService;
use crate::domain::ports::FixtureLoginService;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::InMemoryDocumentRepository;

/// Session middleware with a fresh key and `Secure` disabled for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Handler state over an empty in-memory store and the fixture accounts.
pub fn in_memory_state() -> HttpState {
    let service = Arc::new(ListingService::new(
        Arc::new(InMemoryDocumentRepository::default()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: service.clone(),
        listings_query: service,
    })
}
