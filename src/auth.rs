use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header set by the upstream authentication layer
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identifier of the authenticated user
pub struct AuthUser(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser(user_id.to_owned()))
    }
}
