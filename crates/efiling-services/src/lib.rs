//! Services for the e-filing pipeline: package decoding, rasterization, and
//! the external filing protocol.

pub mod codec;
pub mod efiling;
pub mod rasterizer;

pub use codec::{CodecError, ContentCodec, PackageContent};
pub use efiling::{
    EFilingClient, EFilingClientError, EFilingHubConfig, FilingData, FilingParser,
    HttpEFilingClient, SubmissionError, SubmissionReceipt, SubmissionService, SubmitOutcome,
    UploadOutcome,
};
pub use rasterizer::HttpRasterizer;
