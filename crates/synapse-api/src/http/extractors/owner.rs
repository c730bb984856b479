//! Owner identity extractor.
//!
//! Identity management is external to this service: the caller supplies
//! the already-authenticated owner id in an `X-Owner-Id` header, and
//! every store operation downstream is scoped to it. A missing or
//! malformed header is a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use synapse_types::session::OwnerId;

use crate::http::error::AppError;

/// The owner id of the authenticated caller.
pub struct OwnerIdentity(pub OwnerId);

impl<S: Send + Sync> FromRequestParts<S> for OwnerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get("x-owner-id").ok_or_else(|| {
            AppError::Unauthorized(
                "Missing owner identity. Provide it via the 'X-Owner-Id' header.".to_string(),
            )
        })?;

        let value = header.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid X-Owner-Id header encoding".to_string())
        })?;

        let owner = value.trim().parse::<OwnerId>().map_err(|_| {
            AppError::Unauthorized(format!("Invalid owner id: '{}'", value.trim()))
        })?;

        Ok(OwnerIdentity(owner))
    }
}
