//! The external filing protocol: client, payload assembly, and the
//! two-phase submission orchestrator.

pub mod client;
pub mod parsing;
pub mod submission;

pub use client::{
    EFilingClient, EFilingClientError, EFilingHubConfig, HttpEFilingClient, SubmitOutcome,
    UploadOutcome,
};
pub use parsing::{FilingData, FilingDocument, FilingParser, NavigationUrls};
pub use submission::{
    SubmissionError, SubmissionReceipt, SubmissionService, SUBMIT_FAILED_MESSAGE,
    UPLOAD_FAILED_MESSAGE,
};
