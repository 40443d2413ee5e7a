//! Wiring of domain services onto the configured storage adapter.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use marketplace::domain::ListingService;
use marketplace::domain::ports::{DocumentRepository, FixtureLoginService};
use marketplace::inbound::http::state::{HttpState, HttpStatePorts};
use marketplace::outbound::persistence::{
    DbPool, DieselDocumentRepository, InMemoryDocumentRepository,
};

/// Ports over one listing service backed by `repo`.
fn ports_over<R>(repo: R) -> HttpStatePorts
where
    R: DocumentRepository + 'static,
{
    let listings = Arc::new(ListingService::new(Arc::new(repo), Arc::new(DefaultClock)));
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        listings: listings.clone(),
        listings_query: listings,
    }
}

/// Handler state using PostgreSQL when a pool is configured and process
/// memory otherwise.
pub(crate) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let ports = match db_pool {
        Some(pool) => {
            info!("storing listings in PostgreSQL");
            ports_over(DieselDocumentRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; listings are kept in memory and lost on restart");
            ports_over(InMemoryDocumentRepository::default())
        }
    };
    web::Data::new(HttpState::new(ports))
}
