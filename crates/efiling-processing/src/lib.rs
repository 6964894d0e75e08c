//! Upload validation and document normalization for the submission pipeline.

pub mod normalizer;
pub mod rasterizer;
pub mod validator;

pub use normalizer::{
    DocumentNormalizer, NormalizedPackage, GENERATED_PO_DOCUMENT_TYPE, GENERATED_PO_FILENAME,
};
pub use rasterizer::{ImagePayload, Rasterizer, RasterizeError};
pub use validator::{UploadValidator, ValidationError, ALLOWED_EXTENSIONS, FILE_SIZE_LIMIT_BYTES};
