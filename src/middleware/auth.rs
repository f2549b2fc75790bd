use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header, request::Parts},
};

use crate::{error::AppError, services::session_service, state::AppState};

/// Identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The value must split on single spaces into exactly two parts, the first
/// being the literal `Bearer`.
pub fn bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    let raw = value?.to_str().ok()?;
    let mut parts = raw.split(' ');
    let (scheme, token) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || scheme != "Bearer" || token.is_empty() {
        return None;
    }
    Some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(header::AUTHORIZATION);
        if header.is_none() {
            tracing::debug!("rejected request without authorization header");
            return Err(AppError::Unauthorized);
        }

        let Some(token) = bearer_token(header) else {
            tracing::debug!("rejected malformed authorization header");
            return Err(AppError::Unauthorized);
        };

        match session_service::resolve_token(&state.orm, token).await? {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => {
                tracing::debug!("rejected unknown bearer token");
                Err(AppError::Unauthorized)
            }
        }
    }
}
