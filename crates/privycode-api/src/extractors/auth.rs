//! `AuthOwner` extractor — resolves the inbound bearer credential to an
//! owner and injects the request context.
//!
//! The credential travels either in the `Authorization: Bearer …` header or
//! in the `github_token` cookie set by the OAuth callback. Lookup is an
//! exact match against the owner store; the credential is the session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use privycode_core::error::AppError;
use privycode_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the owner credential.
pub const AUTH_COOKIE: &str = "github_token";

/// Extracted authenticated owner context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthOwner(pub RequestContext);

impl std::ops::Deref for AuthOwner {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = bearer_credential(parts)
            .or_else(|| cookie_credential(parts))
            .ok_or_else(|| AppError::authentication("Missing credential"))?;

        let user = state
            .users
            .find_by_token(&credential)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credential"))?;

        Ok(AuthOwner(RequestContext::new(user)))
    }
}

fn bearer_credential(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_credential(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_string())
}
