/// URL prefix shared by all versioned API routes.
pub const API_PREFIX: &str = "/api/v1";

/// Request body ceiling for the submission endpoint. Slightly above the
/// per-file limit times a realistic attachment count so multipart overhead
/// never trips the transport limit before validation can produce the
/// filing service's own error message.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;
