use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthenticatedIdentity;

/// Extractor for handlers that need the caller's identity.
///
/// The auth gate must already have inserted an `AuthenticatedIdentity` into
/// the request extensions. Bypassed paths carry none, so this rejects with
/// the same 403 the gate uses for a missing token.
#[derive(Debug, Clone)]
pub struct Identity(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(Identity)
            .ok_or(AppError::MissingToken)
    }
}
