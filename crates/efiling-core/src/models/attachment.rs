use bytes::Bytes;

/// Media type every normalized attachment carries.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file as received from the multipart request. Transient.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Last `.`-separated segment of the filename, lowercased. The whole name
    /// when there is no dot, mirroring how the filing service reads it.
    pub fn extension(&self) -> String {
        self.filename
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_lowercase()
    }
}

/// A named PDF payload bound for the external upload phase. Exists only for
/// the duration of one submission call; never persisted here.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub data: Bytes,
    pub content_type: String,
}

impl Attachment {
    pub fn pdf(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
            content_type: PDF_CONTENT_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let file = UploadedFile::new("Scan.JPEG", vec![1u8]);
        assert_eq!(file.extension(), "jpeg");
    }

    #[test]
    fn test_extension_without_dot() {
        let file = UploadedFile::new("evidence", vec![1u8]);
        assert_eq!(file.extension(), "evidence");
    }

    #[test]
    fn test_pdf_attachment_content_type() {
        let attachment = Attachment::pdf("order.pdf", vec![1u8, 2]);
        assert_eq!(attachment.content_type, PDF_CONTENT_TYPE);
    }
}
