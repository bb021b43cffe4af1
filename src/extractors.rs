use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{rejections::AppError, AppState};

/// User id of the caller: the local part of the email address that the
/// fronting proxy puts in the configured identity header.
pub struct CurrentUser(pub String);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(state.user_header.as_str())
            .and_then(|v| v.to_str().ok())
            .and_then(user_id)
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

fn user_id(email: &str) -> Option<String> {
    let local = email.trim().split('@').next()?;
    (!local.is_empty()).then(|| local.to_string())
}

/// The `User-Agent` header, empty when absent.
pub struct UserAgent(pub String);

impl<S: Send + Sync> FromRequestParts<S> for UserAgent {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        Ok(UserAgent(user_agent.to_string()))
    }
}
