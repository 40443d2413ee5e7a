//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see domain ports, so they
//! can be exercised in tests without a database.

use std::sync::Arc;

use crate::domain::TaxonomyService;
use crate::domain::ports::{ListingCommand, ListingQuery, LoginService};

/// Port implementations needed by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
    pub taxonomy: TaxonomyService,
}

impl HttpState {
    /// Build state from ports, using the bundled taxonomy tables.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::ListingService;
    /// use marketplace::domain::ports::FixtureLoginService;
    /// use marketplace::inbound::http::state::{HttpState, HttpStatePorts};
    /// use marketplace::outbound::persistence::InMemoryDocumentRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(ListingService::new(
    ///     Arc::new(InMemoryDocumentRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     listings: service.clone(),
    ///     listings_query: service,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        Self::with_taxonomy(ports, TaxonomyService::builtin())
    }

    /// Build state with an explicit taxonomy service.
    pub fn with_taxonomy(ports: HttpStatePorts, taxonomy: TaxonomyService) -> Self {
        let HttpStatePorts {
            login,
            listings,
            listings_query,
        } = ports;
        Self {
            login,
            listings,
            listings_query,
            taxonomy,
        }
    }
}
