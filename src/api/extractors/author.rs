//! Caller identity taken from the `X-User-ID` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::config::USER_ID_HEADER;
use crate::errors::AppError;

/// Id of the user making the request.
///
/// Rejects with `AppError::Identity` when the header is missing or is not
/// a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for AuthorId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::identity("missing X-User-ID header"))?;

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(AuthorId)
            .ok_or_else(|| AppError::identity("invalid X-User-ID header"))
    }
}
