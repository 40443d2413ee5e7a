//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the domain
//! types they exchange, and the wrappers in `inbound::http::schemas` that
//! describe types from the `taxonomy` crate. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CoachingProfile, Error, ErrorCode, ListingKind, NonTeacherProfile, Owner, ParentProfile,
    Principal, Role, SchoolProfile, StudentProfile, TeacherProfile, VacancyProfile,
};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::listings::ListingResponse;
use crate::inbound::http::schemas::{
    CascadeViewSchema, CategorySchema, ExamSubjectsSchema, ListingBodySchema,
    SelectionActionSchema, SelectionActionTypeSchema, SelectionSchema, StateCitiesSchema,
};
use crate::inbound::http::taxonomy::{
    LocationsResponse, SelectionRequest, SelectionResponse, TaxonomySummary,
};
use crate::inbound::http::users::LoginRequest;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Education marketplace API",
        description = "Listings for teachers, coaching institutes, schools, staff, parents, \
                       students and vacancies, plus the category taxonomy behind their forms."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::taxonomy::list_categories,
        crate::inbound::http::taxonomy::get_category,
        crate::inbound::http::taxonomy::apply_selection,
        crate::inbound::http::taxonomy::list_locations,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::get_listing,
        crate::inbound::http::listings::get_listing_by_slug,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Principal,
        Role,
        Owner,
        LoginRequest,
        ListingKind,
        ListingResponse,
        ListingBodySchema,
        TeacherProfile,
        CoachingProfile,
        SchoolProfile,
        NonTeacherProfile,
        ParentProfile,
        StudentProfile,
        VacancyProfile,
        TaxonomySummary,
        CategorySchema,
        ExamSubjectsSchema,
        SelectionSchema,
        SelectionActionSchema,
        SelectionActionTypeSchema,
        CascadeViewSchema,
        SelectionRequest,
        SelectionResponse,
        StateCitiesSchema,
        LocationsResponse,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Sign-in and the current session"),
        (name = "listings", description = "Marketplace listings of every kind"),
        (name = "taxonomy", description = "Categories, exams, subjects and locations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema(name: &str) -> RefOr<Schema> {
        ApiDoc::openapi()
            .components
            .and_then(|components| components.schemas.get(name).cloned())
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => assert!(
                obj.properties.contains_key(field),
                "schema should have field '{field}'"
            ),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("ListingResponse", &["id", "kind", "slug", "owner", "profile", "createdAt"])]
    #[case("TeacherProfile", &["name", "phone", "teachingCategory", "exams", "subjects"])]
    #[case("CategorySchema", &["name", "exams", "subjects", "examSubjectMap"])]
    #[case("CascadeViewSchema", &["availableSubjects", "examDriven"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let schema = schema(name);
        for field in fields {
            assert_has_field(&schema, field);
        }
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/users/me")]
    #[case("/api/v1/{resource}")]
    #[case("/api/v1/{resource}/{id}")]
    #[case("/api/v1/{resource}/slug/{slug}")]
    #[case("/api/v1/taxonomy/{family}/selection")]
    #[case("/api/v1/locations")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
