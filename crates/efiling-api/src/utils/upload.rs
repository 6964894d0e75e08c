//! Common utilities for the submission multipart form.

use axum::extract::Multipart;
use efiling_core::models::UploadedFile;
use efiling_core::AppError;

/// Extract the repeated `files` parts and their parallel `documentTypes`
/// text parts from the submission form. Field order within each name is
/// preserved; the two lists pair up positionally.
pub async fn extract_submission_form(
    mut multipart: Multipart,
) -> Result<(Vec<UploadedFile>, Vec<String>), AppError> {
    let mut files = Vec::new();
    let mut document_types = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "files" => {
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                files.push(UploadedFile::new(filename, data));
            }
            "documentTypes" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read document type: {}", e))
                })?;
                document_types.push(value);
            }
            _ => {}
        }
    }

    // An empty file list is legal: the generated protection order document
    // alone still makes a complete package.
    Ok((files, document_types))
}
