//! Authenticated-user context.
//!
//! Authentication itself happens at the edge (gateway/middleware outside
//! this service); by the time a request reaches a handler, the verified
//! identity is expected as a `CurrentUser` request extension. Handlers pull
//! it with this extractor and get a 401 when it is absent.

use axum::{extract::FromRequestParts, http::request::Parts};
use efiling_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// The verified filer identity for this request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    /// Province-wide identity the filing hub knows the filer by.
    pub universal_id: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Missing authenticated user context".to_string(),
            ))
        })
    }
}
