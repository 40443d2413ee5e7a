//! Domain primitives, listing rules and services.
//!
//! Purpose: keep marketplace rules independent of HTTP and storage. Types
//! here validate their own invariants; services orchestrate them over the
//! traits declared in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: API error payload and stable codes.
//! - [`Principal`], [`Owner`], [`authorize_mutation`]: who may change what.
//! - [`ListingKind`] and the per-kind profiles: body validation.
//! - [`ListingService`], [`TaxonomyService`]: use-cases behind the handlers.

pub mod error;
pub mod fields;
pub mod listing;
mod listing_service;
pub mod ownership;
pub mod ports;
pub mod principal;
pub mod slug;
mod taxonomy_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fields::{FieldError, PhoneNumber, StringList};
pub use self::listing::{
    CoachingProfile, Facets, ListingFilter, ListingKind, ListingProfile, ListingRecord,
    NonTeacherProfile, NormalizedBody, ParentProfile, SchoolProfile, StudentProfile,
    TeacherProfile, UnknownListingKind, VacancyProfile,
};
pub use self::listing_service::ListingService;
pub use self::ownership::{Owner, authorize_mutation};
pub use self::principal::{
    Email, IdentityValidationError, LoginCredentials, LoginValidationError, Principal, Role,
    UserId,
};
pub use self::slug::{generate_slug, is_valid_slug, slugify};
pub use self::taxonomy_service::TaxonomyService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use marketplace::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
