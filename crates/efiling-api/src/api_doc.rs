//! OpenAPI document, served at /api-docs/openapi.json.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health,
        crate::handlers::submission_create::submit_filing,
        crate::handlers::submission_update::update_filing,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::handlers::submission_create::SubmitResponse,
        crate::handlers::submission_update::PackageUpdateRequest,
    )),
    tags(
        (name = "filing", description = "Protection order package submission"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
