//! Caller identity
//!
//! Authentication happens in the identity proxy in front of this service,
//! which forwards the authenticated user id in `X-User-Id`.

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::utils::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest accepted user id
const MAX_USER_ID_LEN: usize = 128;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_USER_ID_LEN);

        match user_id {
            Some(id) => {
                let user = CurrentUser {
                    user_id: id.to_string(),
                };
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            None => {
                tracing::warn!(uri = %parts.uri, "Request without caller identity");
                Err(AppError::not_authenticated())
            }
        }
    }
}
