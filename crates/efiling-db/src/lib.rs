//! Persistence layer: store traits and their Postgres implementations.

mod db;
pub mod traits;

pub use db::{ApplicationRepository, PreparedPdfRepository, SubmissionRepository};
pub use traits::{ApplicationStore, PreparedPdfStore, SubmissionStore};
