//! Filing data assembly: shapes the decrypted case metadata, the normalized
//! documents, and the return-navigation context into the package submission
//! payload.

use efiling_core::models::Attachment;
use serde::Serialize;
use uuid::Uuid;

/// URLs the filing hub redirects the filer back to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationUrls {
    pub success: String,
    pub error: String,
    pub cancel: String,
}

/// One document entry in the filing manifest.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilingDocument {
    pub name: String,
    pub document_type: String,
    pub mime_type: String,
}

/// Payload for the package submission phase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingData {
    pub client_app_name: String,
    pub navigation_urls: NavigationUrls,
    pub documents: Vec<FilingDocument>,
    /// Decrypted case metadata, already augmented with `applicationId`.
    pub package_metadata: serde_json::Value,
}

/// Builds `FilingData`. Pure: no I/O, no persistence.
#[derive(Debug, Clone)]
pub struct FilingParser {
    app_name: String,
    return_base_url: String,
}

impl FilingParser {
    pub fn new(app_name: impl Into<String>, return_base_url: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            return_base_url: return_base_url.into(),
        }
    }

    /// Assemble the submission payload. Documents are zipped with their
    /// parallel document-type tags in order; the lists are equal-length by
    /// construction when they come from the normalizer.
    pub fn filing_data(
        &self,
        application_id: Uuid,
        metadata: serde_json::Value,
        attachments: &[Attachment],
        document_types: &[String],
    ) -> FilingData {
        let documents = attachments
            .iter()
            .zip(document_types.iter())
            .map(|(attachment, document_type)| FilingDocument {
                name: attachment.filename.clone(),
                document_type: document_type.clone(),
                mime_type: attachment.content_type.clone(),
            })
            .collect();

        let base = self.return_base_url.trim_end_matches('/');
        FilingData {
            client_app_name: self.app_name.clone(),
            navigation_urls: NavigationUrls {
                success: format!("{}/dashboard/{}?filing=success", base, application_id),
                error: format!("{}/dashboard/{}?filing=error", base, application_id),
                cancel: format!("{}/dashboard/{}?filing=cancel", base, application_id),
            },
            documents,
            package_metadata: metadata,
        }
    }
}
