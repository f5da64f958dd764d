//! `AuthUser` extractor — pulls the Bearer token from the Authorization
//! header, resolves it through the identity gate, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cumulus_core::error::AppError;
use cumulus_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::unauthenticated(
                    "Missing or invalid authorization header",
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::unauthenticated(
                "Missing or invalid authorization header",
            ))
        })?;

        let session = state.identity_gate.resolve(token).await?;

        Ok(AuthUser(RequestContext::new(session.user_id)))
    }
}
