//! Domain ports: the traits the hexagon exposes to adapters.
//!
//! Driven ports ([`DocumentRepository`]) are implemented by outbound
//! adapters. Driving ports ([`LoginService`], [`ListingCommand`],
//! [`ListingQuery`]) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod document_repository;
mod listing_command;
mod listing_query;
mod login_service;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
#[cfg(test)]
pub use listing_command::MockListingCommand;
pub use listing_command::ListingCommand;
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::ListingQuery;
pub use login_service::{FixtureLoginService, LoginService};
