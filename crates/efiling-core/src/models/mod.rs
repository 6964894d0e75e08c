//! Domain models for the e-filing submission pipeline.

mod application;
mod attachment;
mod prepared_pdf;
mod submission;

pub use application::Application;
pub use attachment::{Attachment, UploadedFile, PDF_CONTENT_TYPE};
pub use prepared_pdf::PreparedPdf;
pub use submission::{EFilingSubmission, SubmissionStatus};
