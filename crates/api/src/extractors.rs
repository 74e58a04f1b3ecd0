//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::str::FromStr;

use oblik_shared::types::UserId;
use oblik_shared::AppError;

use crate::error::ApiError;

/// Header carrying the acting user's identity.
///
/// Authentication itself is an upstream concern; the gateway verifies the
/// session and forwards the user id here. Every command records this
/// identity in the event rows and the audit log.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The acting user, extracted from the gateway-verified header.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub UserId);

impl Actor {
    /// Returns the acting user's id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::Validation(format!(
                    "Missing {ACTOR_HEADER} header"
                )))
            })?;

        let user_id = UserId::from_str(header).map_err(|_| {
            ApiError(AppError::Validation(format!(
                "Invalid {ACTOR_HEADER} header: {header}"
            )))
        })?;

        Ok(Self(user_id))
    }
}
