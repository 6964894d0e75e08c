use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use efiling_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError, PACKAGE_NOT_READY_MESSAGE};
use crate::state::AppState;
use crate::utils::upload::extract_submission_form;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Filing hub URL where the filer completes the package.
    pub redirect_url: String,
    /// Hub-provided note accompanying the redirect; null when it sent none.
    pub message: Option<String>,
}

/// Submit an application's filing package: validate and normalize the
/// uploaded files, decode the generated protection order, and drive the
/// two-phase protocol against the filing hub.
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/filing",
    tag = "filing",
    params(
        ("application_id" = Uuid, Path, description = "Application to submit")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Package submitted", body = SubmitResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 500, description = "Filing hub failure", body = ErrorResponse)
    )
)]
pub async fn submit_filing(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(application_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let (files, document_types) = extract_submission_form(multipart).await?;

    // Validations happen before any record is touched.
    state
        .filing
        .validator
        .validate_files(&files)
        .map_err(HttpAppError::from)?;

    let application = state
        .db
        .applications
        .find_for_user(application_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let prepared_pdf_id = application
        .prepared_pdf_id
        .ok_or_else(|| AppError::InvalidInput(PACKAGE_NOT_READY_MESSAGE.to_string()))?;

    let prepared = state
        .db
        .prepared_pdfs
        .find(prepared_pdf_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "Prepared package {} is missing for application {}",
                prepared_pdf_id, application_id
            ))
        })?;

    let content = state
        .filing
        .codec
        .decode_package(&prepared, application_id)
        .map_err(HttpAppError::from)?;

    let package = state
        .filing
        .normalizer
        .normalize(content.pdf, files, document_types)
        .await
        .map_err(HttpAppError::from)?;

    let filing_data = state.filing.parser.filing_data(
        application_id,
        content.metadata,
        &package.attachments,
        &package.document_types,
    );

    let receipt = state
        .filing
        .submission_service
        .submit(
            &user.universal_id,
            &application,
            &package.attachments,
            &filing_data,
        )
        .await
        .map_err(HttpAppError::from)?;

    Ok(Json(SubmitResponse {
        redirect_url: receipt.redirect_url,
        message: receipt.message,
    }))
}
