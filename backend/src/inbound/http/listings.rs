//! Listing collection handlers.
//!
//! Every listing kind shares one set of routes keyed by its collection
//! segment:
//!
//! ```text
//! GET    /api/v1/{resource}?category=&exam=&subject=&state=&city=&mine=
//! POST   /api/v1/{resource}
//! GET    /api/v1/{resource}/{id}
//! GET    /api/v1/{resource}/slug/{slug}
//! PUT    /api/v1/{resource}/{id}
//! DELETE /api/v1/{resource}/{id}
//! ```
//!
//! `{resource}` is one of `teachers`, `coachings`, `schools`,
//! `non-teachers`, `parents`, `students` or `vacancies`. Reads are public;
//! writes and `mine=true` need a session.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Error, ListingFilter, ListingKind, ListingRecord, Owner};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ListingBodySchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

/// A stored listing as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// Listing id.
    pub id: Uuid,
    /// Listing kind.
    pub kind: ListingKind,
    /// URL slug.
    #[schema(example = "ravi-kumar-1767340800000")]
    pub slug: String,
    /// Who may edit the listing besides admins.
    pub owner: Owner,
    /// Normalised profile; its shape depends on `kind`.
    #[schema(value_type = ListingBodySchema)]
    pub profile: Value,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<ListingRecord> for ListingResponse {
    fn from(record: ListingRecord) -> Self {
        let ListingRecord {
            id,
            kind,
            slug,
            owner,
            body,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            kind,
            slug,
            owner,
            profile: body,
            created_at,
            updated_at,
        }
    }
}

/// List filters. Matching ignores case; unset filters match everything.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingListQuery {
    /// Category name.
    pub category: Option<String>,
    /// Exam name.
    pub exam: Option<String>,
    /// Subject name.
    pub subject: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Only listings owned by the caller. Requires a session.
    pub mine: Option<bool>,
}

impl ListingListQuery {
    fn into_filter(self, session: &SessionContext) -> Result<ListingFilter, Error> {
        let owned_by = if self.mine.unwrap_or(false) {
            Some(session.require_principal()?)
        } else {
            None
        };
        Ok(ListingFilter {
            category: self.category,
            exam: self.exam,
            subject: self.subject,
            state: self.state,
            city: self.city,
            owned_by,
        })
    }
}

fn resolve_kind(resource: &str) -> Result<ListingKind, Error> {
    ListingKind::from_path_segment(resource)
        .ok_or_else(|| Error::not_found(format!("unknown resource: {resource}")))
}

fn resolve_item(resource: &str, id: &str) -> Result<(ListingKind, Uuid), Error> {
    let kind = resolve_kind(resource)?;
    Ok((kind, parse_uuid("id", id)?))
}

/// List listings of one kind.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}",
    params(
        ("resource" = String, Path, description = "Collection, e.g. `teachers`"),
        ListingListQuery
    ),
    responses(
        (status = 200, description = "Matching listings, newest first", body = [ListingResponse]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 401, description = "`mine=true` without a session", body = Error),
        (status = 404, description = "Unknown resource", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "listListings",
    security([])
)]
#[get("/{resource}")]
pub async fn list_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
    resource: web::Path<String>,
    query: web::Query<ListingListQuery>,
) -> ApiResult<web::Json<Vec<ListingResponse>>> {
    let kind = resolve_kind(&resource)?;
    let filter = query.into_inner().into_filter(&session)?;
    let records = state.listings_query.list(kind, &filter).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

/// Create a listing owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/{resource}",
    params(("resource" = String, Path, description = "Collection, e.g. `teachers`")),
    request_body = ListingBodySchema,
    responses(
        (
            status = 201,
            description = "Created",
            body = ListingResponse,
            headers(("Location" = String, description = "URL of the new listing"))
        ),
        (status = 400, description = "Invalid body", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown resource", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/{resource}")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    resource: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let kind = resolve_kind(&resource)?;
    let principal = session.require_principal()?;
    let record = state
        .listings
        .create(&principal, kind, body.into_inner())
        .await?;
    info!(%kind, id = %record.id, slug = %record.slug, "listing created");
    let location = format!("/api/v1/{}/{}", kind.path_segment(), record.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(ListingResponse::from(record)))
}

/// Fetch a listing by id.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Collection, e.g. `teachers`"),
        ("id" = Uuid, Path, description = "Listing id")
    ),
    responses(
        (status = 200, description = "Listing", body = ListingResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No such listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getListing",
    security([])
)]
#[get("/{resource}/{id}")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ListingResponse>> {
    let (resource, id) = path.into_inner();
    let (kind, id) = resolve_item(&resource, &id)?;
    let record = state.listings_query.get(kind, id).await?;
    Ok(web::Json(record.into()))
}

/// Fetch a listing by slug.
#[utoipa::path(
    get,
    path = "/api/v1/{resource}/slug/{slug}",
    params(
        ("resource" = String, Path, description = "Collection, e.g. `teachers`"),
        ("slug" = String, Path, description = "Listing slug")
    ),
    responses(
        (status = 200, description = "Listing", body = ListingResponse),
        (status = 404, description = "No such listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getListingBySlug",
    security([])
)]
#[get("/{resource}/slug/{slug}")]
pub async fn get_listing_by_slug(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ListingResponse>> {
    let (resource, slug) = path.into_inner();
    let kind = resolve_kind(&resource)?;
    let record = state.listings_query.get_by_slug(kind, &slug).await?;
    Ok(web::Json(record.into()))
}

/// Replace a listing's profile.
#[utoipa::path(
    put,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Collection, e.g. `teachers`"),
        ("id" = Uuid, Path, description = "Listing id")
    ),
    request_body = ListingBodySchema,
    responses(
        (status = 200, description = "Updated listing", body = ListingResponse),
        (status = 400, description = "Invalid body", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Neither owner nor admin", body = Error),
        (status = 404, description = "No such listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/{resource}/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> ApiResult<web::Json<ListingResponse>> {
    let (resource, id) = path.into_inner();
    let (kind, id) = resolve_item(&resource, &id)?;
    let principal = session.require_principal()?;
    let record = state
        .listings
        .update(&principal, kind, id, body.into_inner())
        .await?;
    info!(%kind, %id, user_id = %principal.user_id(), "listing updated");
    Ok(web::Json(record.into()))
}

/// Delete a listing.
#[utoipa::path(
    delete,
    path = "/api/v1/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "Collection, e.g. `teachers`"),
        ("id" = Uuid, Path, description = "Listing id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Neither owner nor admin", body = Error),
        (status = 404, description = "No such listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/{resource}/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (resource, id) = path.into_inner();
    let (kind, id) = resolve_item(&resource, &id)?;
    let principal = session.require_principal()?;
    state.listings.delete(&principal, kind, id).await?;
    info!(%kind, %id, user_id = %principal.user_id(), "listing deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// Register the listing routes on a scope. Call last: the routes match any
/// first path segment.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_listings)
        .service(create_listing)
        .service(get_listing_by_slug)
        .service(get_listing)
        .service(update_listing)
        .service(delete_listing);
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
