//! Document normalization: turns validated uploads plus the generated
//! protection order into the uniform, ordered PDF attachment list the filing
//! service expects.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use efiling_core::models::{Attachment, UploadedFile};

use crate::rasterizer::{ImagePayload, Rasterizer, RasterizeError};

/// Filename given to the generated protection order document.
pub const GENERATED_PO_FILENAME: &str = "fpo_generated.pdf";

/// Document-type tag for the generated protection order document.
pub const GENERATED_PO_DOCUMENT_TYPE: &str = "POR";

/// The normalized output: attachments and their parallel document-type tags.
/// The generated order is always first; tags and files keep request order.
#[derive(Debug)]
pub struct NormalizedPackage {
    pub attachments: Vec<Attachment>,
    pub document_types: Vec<String>,
}

/// Assembles the outgoing attachment list, rasterizing non-PDF uploads.
pub struct DocumentNormalizer {
    rasterizer: Arc<dyn Rasterizer>,
}

impl DocumentNormalizer {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Produce the ordered attachment list: the generated order (tagged
    /// "POR") first, then every upload in request order. Uploads already in
    /// PDF form pass through unchanged; images are converted one call per
    /// file so a conversion failure is attributable, and their filename
    /// extension is rewritten to `.pdf`.
    pub async fn normalize(
        &self,
        po_pdf: Bytes,
        files: Vec<UploadedFile>,
        document_types: Vec<String>,
    ) -> Result<NormalizedPackage, RasterizeError> {
        let mut tags = document_types;
        tags.insert(0, GENERATED_PO_DOCUMENT_TYPE.to_string());

        let mut attachments = Vec::with_capacity(files.len() + 1);
        attachments.push(Attachment::pdf(GENERATED_PO_FILENAME, po_pdf));

        for file in files {
            if file.filename.to_lowercase().ends_with(".pdf") {
                attachments.push(Attachment::pdf(file.filename, file.data));
                continue;
            }

            let payload = ImagePayload {
                base64: general_purpose::STANDARD.encode(&file.data),
                image_type: file.extension(),
            };
            let pdf = self.rasterizer.image_to_pdf(vec![payload]).await?;
            tracing::debug!(filename = %file.filename, "Attachment rasterized to PDF");
            attachments.push(Attachment::pdf(rewrite_extension(&file.filename), pdf));
        }

        Ok(NormalizedPackage {
            attachments,
            document_types: tags,
        })
    }
}

/// Replace the last extension with `.pdf` (append when there is none).
fn rewrite_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) => format!("{}.pdf", stem),
        None => format!("{}.pdf", filename),
    }
}
