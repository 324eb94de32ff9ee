//! HTTP routing and OpenAPI documentation configuration.
//!
//! Routes come from the composed modules. When API docs are enabled the OpenAPI
//! document collected from every module is served at `/api/docs/openapi.json`,
//! with Swagger UI at `/api/docs`.

use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{composition::Module, controller, state::AppState};

#[derive(OpenApi)]
#[openapi(info(title = "Schoolboard", description = "Schoolboard API"), tags(
    (name = controller::school::SCHOOL_TAG, description = "School API routes"),
    (name = controller::teacher::TEACHER_TAG, description = "Teacher API routes"),
))]
struct ApiDoc;

/// Builds the router for a set of modules.
///
/// # Arguments
/// - `modules` - Modules whose routes are merged, in order
/// - `api_docs` - Whether to mount Swagger UI and the OpenAPI document
///
/// # Returns
/// A `Router<AppState>` awaiting its state.
pub fn router(modules: &[Arc<dyn Module>], api_docs: bool) -> Router<AppState> {
    let (routes, api) = modules
        .iter()
        .fold(OpenApiRouter::with_openapi(ApiDoc::openapi()), |router, module| {
            router.merge(module.routes())
        })
        .split_for_parts();

    if api_docs {
        routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
    } else {
        routes
    }
}
