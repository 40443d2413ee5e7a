//! Taxonomy and location lookups backing the registration and search forms.
//!
//! ```text
//! GET  /api/v1/taxonomy/{family}
//! GET  /api/v1/taxonomy/{family}/categories/{category}
//! POST /api/v1/taxonomy/{family}/selection
//! GET  /api/v1/locations
//! ```
//!
//! All routes are public. `{family}` is `teaching` or `coaching`.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use taxonomy::{CascadeView, Category, Selection, SelectionAction, StateCities};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    CascadeViewSchema, CategorySchema, SelectionActionSchema, SelectionSchema, StateCitiesSchema,
};
use crate::inbound::http::state::HttpState;

/// Category names of one taxonomy family.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomySummary {
    /// Family name.
    #[schema(example = "teaching")]
    pub family: String,
    /// Category names in menu order.
    pub categories: Vec<String>,
}

/// A category with its exam and subject tables.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    category: &'static Category,
    exam_driven: bool,
}

/// Body of a cascade step.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectionRequest {
    /// Selection the form currently holds; empty when omitted.
    #[serde(default)]
    #[schema(value_type = SelectionSchema)]
    pub selection: Selection,
    /// What the user just did.
    #[schema(value_type = SelectionActionSchema)]
    pub action: SelectionAction,
}

/// Result of a cascade step.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectionResponse {
    /// Selection after the action, pruned to what the category offers.
    #[schema(value_type = SelectionSchema)]
    pub selection: Selection,
    /// What the dropdowns should now show.
    #[schema(value_type = CascadeViewSchema)]
    pub view: CascadeView,
}

/// Bundled states with their cities.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationsResponse {
    /// States in table order.
    #[schema(value_type = Vec<StateCitiesSchema>)]
    pub states: &'static [StateCities],
}

/// List the categories of a family.
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy/{family}",
    params(("family" = String, Path, description = "`teaching` or `coaching`")),
    responses(
        (status = 200, description = "Category names", body = TaxonomySummary),
        (status = 404, description = "Unknown family", body = Error)
    ),
    tags = ["taxonomy"],
    operation_id = "listCategories",
    security([])
)]
#[get("/taxonomy/{family}")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    family: web::Path<String>,
) -> ApiResult<web::Json<TaxonomySummary>> {
    let family = state.taxonomy.family(&family)?;
    let categories = state
        .taxonomy
        .taxonomy(family)
        .category_names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    Ok(web::Json(TaxonomySummary {
        family: family.to_string(),
        categories,
    }))
}

/// Fetch one category's exams, subjects and exam-to-subject map.
#[utoipa::path(
    get,
    path = "/api/v1/taxonomy/{family}/categories/{category}",
    params(
        ("family" = String, Path, description = "`teaching` or `coaching`"),
        ("category" = String, Path, description = "Category name, any case")
    ),
    responses(
        (status = 200, description = "Category tables", body = CategorySchema),
        (status = 404, description = "Unknown family or category", body = Error)
    ),
    tags = ["taxonomy"],
    operation_id = "getCategory",
    security([])
)]
#[get("/taxonomy/{family}/categories/{category}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CategoryDetail>> {
    let (family, name) = path.into_inner();
    let family = state.taxonomy.family(&family)?;
    let category = state.taxonomy.category(family, &name)?;
    Ok(web::Json(CategoryDetail {
        category,
        exam_driven: category.is_exam_driven(),
    }))
}

/// Apply one dropdown interaction to a selection.
#[utoipa::path(
    post,
    path = "/api/v1/taxonomy/{family}/selection",
    params(("family" = String, Path, description = "`teaching` or `coaching`")),
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Next selection and view", body = SelectionResponse),
        (status = 400, description = "Malformed action", body = Error),
        (status = 404, description = "Unknown family", body = Error)
    ),
    tags = ["taxonomy"],
    operation_id = "applySelection",
    security([])
)]
#[post("/taxonomy/{family}/selection")]
pub async fn apply_selection(
    state: web::Data<HttpState>,
    family: web::Path<String>,
    body: web::Json<SelectionRequest>,
) -> ApiResult<web::Json<SelectionResponse>> {
    let family = state.taxonomy.family(&family)?;
    let SelectionRequest { selection, action } = body.into_inner();
    let (selection, view) = state.taxonomy.apply(family, &selection, action);
    Ok(web::Json(SelectionResponse { selection, view }))
}

/// List states and their cities.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses((status = 200, description = "States and cities", body = LocationsResponse)),
    tags = ["taxonomy"],
    operation_id = "listLocations",
    security([])
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> web::Json<LocationsResponse> {
    web::Json(LocationsResponse {
        states: state.taxonomy.locations().states(),
    })
}

/// Register the taxonomy routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(get_category)
        .service(apply_selection)
        .service(list_locations);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::in_memory_state;
    use crate::inbound::http::validation::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(in_memory_state()))
            .app_data(json_config())
            .service(web::scope("/api/v1").configure(configure))
    }

    #[actix_web::test]
    async fn lists_category_names() {
        let app = test::init_service(app()).await;

        let summary: TaxonomySummary = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/taxonomy/Teaching")
                .to_request(),
        )
        .await;

        assert_eq!(summary.family, "teaching");
        assert_eq!(summary.categories.first().map(String::as_str), Some("Science"));
        assert!(summary.categories.iter().any(|name| name == "Music"));
    }

    #[rstest]
    #[case("/api/v1/taxonomy/tutoring")]
    #[case("/api/v1/taxonomy/teaching/categories/astrology")]
    #[case("/api/v1/taxonomy/tutoring/categories/science")]
    #[actix_web::test]
    async fn unknown_names_are_not_found(#[case] uri: &str) {
        let app = test::init_service(app()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[case("science", "Science", true)]
    #[case("MUSIC", "Music", false)]
    #[actix_web::test]
    async fn category_detail_reports_exam_driven(
        #[case] segment: &str,
        #[case] name: &str,
        #[case] exam_driven: bool,
    ) {
        let app = test::init_service(app()).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/taxonomy/teaching/categories/{segment}"))
                .to_request(),
        )
        .await;

        assert_eq!(body["name"], name);
        assert_eq!(body["examDriven"], exam_driven);
        assert!(body["subjects"].is_array());
        assert!(body["examSubjectMap"].is_array());
    }

    #[actix_web::test]
    async fn selection_step_prunes_subjects() {
        let app = test::init_service(app()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/taxonomy/teaching/selection")
                .set_json(json!({
                    "selection": {
                        "category": "science",
                        "exams": ["JEE Main"],
                        "subjects": ["Physics", "Biology"]
                    },
                    "action": { "type": "selectExam", "value": "neet" }
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: SelectionResponse = test::read_body_json(res).await;
        assert_eq!(body.selection.category.as_deref(), Some("Science"));
        assert_eq!(body.selection.exams, vec!["JEE Main", "NEET"]);
        assert_eq!(body.selection.subjects, vec!["Physics"]);
        assert!(body.view.exam_driven);
        assert!(body.view.available_subjects.iter().any(|s| s == "Biology"));
    }

    #[actix_web::test]
    async fn selection_defaults_to_empty() {
        let app = test::init_service(app()).await;

        let body: SelectionResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/taxonomy/coaching/selection")
                .set_json(json!({
                    "action": { "type": "selectCategory", "value": "engineering entrance" }
                }))
                .to_request(),
        )
        .await;

        assert_eq!(body.selection.category.as_deref(), Some("Engineering Entrance"));
        assert!(body.selection.exams.is_empty());
        assert!(body.view.exams.iter().any(|exam| exam == "BITSAT"));
    }

    #[actix_web::test]
    async fn unknown_action_is_an_invalid_request() {
        let app = test::init_service(app()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/taxonomy/teaching/selection")
                .set_json(json!({ "action": { "type": "pickEverything" } }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn lists_states_with_cities() {
        let app = test::init_service(app()).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/locations").to_request(),
        )
        .await;

        let rajasthan = body["states"]
            .as_array()
            .and_then(|states| states.iter().find(|state| state["name"] == "Rajasthan"))
            .expect("Rajasthan listed");
        assert!(
            rajasthan["cities"]
                .as_array()
                .is_some_and(|cities| cities.iter().any(|city| city == "Kota"))
        );
    }
}
