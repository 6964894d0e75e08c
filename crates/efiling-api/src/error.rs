//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `.map_err(Into::into)`
//! so they become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use efiling_core::{AppError, ErrorMetadata, LogLevel};
use efiling_processing::{RasterizeError, ValidationError};
use efiling_services::{CodecError, SubmissionError};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

/// Client-facing message when a file fails the empty check.
pub const EMPTY_FILE_MESSAGE: &str = "One of the files was empty.";

/// Client-facing message when a file exceeds the size ceiling.
pub const FILE_TOO_LARGE_MESSAGE: &str = "Filesize limit exceeded: 10 MB.";

/// Client-facing message when a file's extension is not accepted.
pub const WRONG_FORMAT_MESSAGE: &str = "Wrong file format.";

/// Client-facing message when the application has no generated package.
pub const PACKAGE_NOT_READY_MESSAGE: &str = "PO PDF is not generated.";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Retry the submission")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from efiling-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Validation failures carry the filing service's fixed client messages.
impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::EmptyFile { .. } => {
                AppError::InvalidInput(EMPTY_FILE_MESSAGE.to_string())
            }
            ValidationError::FileTooLarge { .. } => {
                AppError::InvalidInput(FILE_TOO_LARGE_MESSAGE.to_string())
            }
            ValidationError::UnsupportedFormat { .. } => {
                AppError::InvalidInput(WRONG_FORMAT_MESSAGE.to_string())
            }
        };
        HttpAppError(app)
    }
}

impl From<RasterizeError> for HttpAppError {
    fn from(err: RasterizeError) -> Self {
        HttpAppError(AppError::Conversion(err.to_string()))
    }
}

impl From<CodecError> for HttpAppError {
    fn from(err: CodecError) -> Self {
        let app = match err {
            CodecError::Decryption(msg) => AppError::Decryption(msg),
            CodecError::MalformedMetadata(msg) => AppError::MalformedMetadata(msg),
        };
        HttpAppError(app)
    }
}

/// Protocol failures surface the filing hub's message at a server-error
/// status; store failures pass through unchanged.
impl From<SubmissionError> for HttpAppError {
    fn from(err: SubmissionError) -> Self {
        let app = match err {
            SubmissionError::UploadFailed(msg) => AppError::EFiling(msg),
            SubmissionError::SubmissionFailed(msg) => AppError::EFiling(msg),
            SubmissionError::Store(err) => err,
        };
        HttpAppError(app)
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production for security; in non-production, only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_validation_error_empty_file() {
        let err = ValidationError::EmptyFile {
            filename: "blank.pdf".to_string(),
        };
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "One of the files was empty."),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_validation_error_file_too_large() {
        let err = ValidationError::FileTooLarge {
            filename: "huge.pdf".to_string(),
            size: 11 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Filesize limit exceeded: 10 MB."),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_validation_error_unsupported_format() {
        let err = ValidationError::UnsupportedFormat {
            filename: "notes.docx".to_string(),
            allowed: vec!["pdf".to_string()],
        };
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Wrong file format."),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_from_submission_error_surfaces_hub_message() {
        let err = SubmissionError::UploadFailed("Duplicate document name.".to_string());
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::EFiling(msg) => assert_eq!(msg, "Duplicate document name."),
            _ => panic!("Expected EFiling variant"),
        }
        let err = SubmissionError::SubmissionFailed("Registry unavailable.".to_string());
        let HttpAppError(app_err) = err.into();
        assert!(matches!(app_err, AppError::EFiling(_)));
    }

    #[test]
    fn test_from_codec_error() {
        let HttpAppError(app_err) = CodecError::Decryption("bad key".to_string()).into();
        assert!(matches!(app_err, AppError::Decryption(_)));

        let HttpAppError(app_err) =
            CodecError::MalformedMetadata("expected value".to_string()).into();
        assert!(matches!(app_err, AppError::MalformedMetadata(_)));
    }

    /// Verifies the public error response contract: serialized ErrorResponse has "error",
    /// "code", "recoverable", and optionally "details" / "error_type" / "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Not found".to_string(),
            details: Some("Resource not found".to_string()),
            error_type: Some("NotFound".to_string()),
            code: "NOT_FOUND".to_string(),
            recoverable: false,
            suggested_action: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("code").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
    }
}
