use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use efiling_core::AppError;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdateRequest {
    pub package_number: String,
    pub package_url: String,
}

/// Record the package number and URL the filing office assigned to the
/// application's most recent submission. Called back once the office has
/// processed the package; this is the only mutation path after a submission
/// succeeds, and repeating it with the same values is a no-op.
#[utoipa::path(
    put,
    path = "/api/v1/applications/{application_id}/filing",
    tag = "filing",
    params(
        ("application_id" = Uuid, Path, description = "Application whose submission to update")
    ),
    request_body = PackageUpdateRequest,
    responses(
        (status = 204, description = "Submission record updated"),
        (status = 404, description = "No submission record to update", body = ErrorResponse)
    )
)]
pub async fn update_filing(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(application_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<PackageUpdateRequest>,
) -> Result<StatusCode, HttpAppError> {
    let application = state
        .db
        .applications
        .find_for_user(application_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let submission = match application.last_submission_id {
        Some(ref submission_id) => state
            .db
            .submissions
            .find_by_submission_id(submission_id)
            .await?,
        None => None,
    };

    let submission = submission.ok_or_else(|| {
        AppError::NotFound("No submission record for this application".to_string())
    })?;

    state
        .db
        .submissions
        .set_package(submission.id, &body.package_number, &body.package_url)
        .await?;

    tracing::info!(
        application_id = %application_id,
        submission_id = ?submission.submission_id,
        package_number = %body.package_number,
        "Submission packaged"
    );

    Ok(StatusCode::NO_CONTENT)
}
