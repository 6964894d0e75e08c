use efiling_core::models::UploadedFile;

/// Upload size ceiling enforced before any state is created.
pub const FILE_SIZE_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Extensions the filing service accepts. Anything that is not already a PDF
/// is rasterized to one during normalization.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "jpg", "jpeg", "gif", "png"];

/// Validation errors for submitted files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file: {filename}")]
    EmptyFile { filename: String },

    #[error("File too large: {filename} is {size} bytes (max: {max} bytes)")]
    FileTooLarge {
        filename: String,
        size: usize,
        max: usize,
    },

    #[error("Unsupported format: {filename} (allowed: {allowed:?})")]
    UnsupportedFormat {
        filename: String,
        allowed: Vec<String>,
    },
}

/// Validates uploaded files against the filing service's constraints.
///
/// Files are checked in request order (emptiness, then size, then
/// extension); the first failure wins, so the caller's error message always
/// names a single cause.
pub struct UploadValidator {
    file_size_limit: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(file_size_limit: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            file_size_limit,
            allowed_extensions,
        }
    }

    pub fn validate_files(&self, files: &[UploadedFile]) -> Result<(), ValidationError> {
        for file in files {
            if file.data.is_empty() {
                return Err(ValidationError::EmptyFile {
                    filename: file.filename.clone(),
                });
            }
            if file.data.len() > self.file_size_limit {
                return Err(ValidationError::FileTooLarge {
                    filename: file.filename.clone(),
                    size: file.data.len(),
                    max: self.file_size_limit,
                });
            }
            if !self.allowed_extensions.contains(&file.extension()) {
                return Err(ValidationError::UnsupportedFormat {
                    filename: file.filename.clone(),
                    allowed: self.allowed_extensions.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(
            FILE_SIZE_LIMIT_BYTES,
            ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, len: usize) -> UploadedFile {
        UploadedFile::new(name, vec![0u8; len])
    }

    #[test]
    fn test_validate_files_ok() {
        let validator = UploadValidator::default();
        let files = vec![file("order.pdf", 1024), file("scan.jpeg", 2048)];
        assert!(validator.validate_files(&files).is_ok());
    }

    #[test]
    fn test_empty_file_rejected() {
        let validator = UploadValidator::default();
        let files = vec![file("order.pdf", 1024), file("blank.pdf", 0)];
        assert!(matches!(
            validator.validate_files(&files),
            Err(ValidationError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let validator = UploadValidator::default();
        let files = vec![file("huge.pdf", FILE_SIZE_LIMIT_BYTES + 1)];
        assert!(matches!(
            validator.validate_files(&files),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_file_at_limit_accepted() {
        let validator = UploadValidator::default();
        let files = vec![file("exact.pdf", FILE_SIZE_LIMIT_BYTES)];
        assert!(validator.validate_files(&files).is_ok());
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let validator = UploadValidator::default();
        let files = vec![file("notes.docx", 512)];
        assert!(matches!(
            validator.validate_files(&files),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let validator = UploadValidator::default();
        let files = vec![file("SCAN.PNG", 512), file("Order.Pdf", 512)];
        assert!(validator.validate_files(&files).is_ok());
    }

    #[test]
    fn test_no_extension_rejected() {
        let validator = UploadValidator::default();
        let files = vec![file("evidence", 512)];
        assert!(matches!(
            validator.validate_files(&files),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_first_failure_wins_in_file_order() {
        let validator = UploadValidator::default();
        // The empty file comes first, so its error is the one reported even
        // though the second file also fails validation.
        let files = vec![file("blank.png", 0), file("notes.docx", 512)];
        assert!(matches!(
            validator.validate_files(&files),
            Err(ValidationError::EmptyFile { filename }) if filename == "blank.png"
        ));
    }
}
