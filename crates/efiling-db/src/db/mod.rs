//! Postgres repositories for the submission pipeline's records.

mod application;
mod prepared_pdf;
mod submission;

pub use application::ApplicationRepository;
pub use prepared_pdf::PreparedPdfRepository;
pub use submission::SubmissionRepository;
