//! GitHub OAuth handlers: login redirect and callback.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;
use uuid::Uuid;

use privycode_core::error::AppError;

use crate::dto::request::OAuthCallbackQuery;
use crate::error::ApiError;
use crate::extractors::auth::AUTH_COOKIE;
use crate::state::AppState;

/// GET /api/auth/github/login
pub async fn github_login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let csrf_state = Uuid::new_v4().to_string();
    let url = state.oauth.authorize_url(&csrf_state)?;
    Ok(Redirect::to(&url))
}

/// GET /api/auth/github/callback
///
/// Exchanges the code, upserts the owner (overwriting the stored credential
/// on re-authentication), sets the credential cookie, and sends the browser
/// to the frontend dashboard without exposing the token in the URL.
pub async fn github_callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::validation("Missing code in callback"))?;

    let access_token = state.oauth.exchange_code(&code).await?;
    let github_user = state.oauth.fetch_user(&access_token).await?;

    let user = state
        .user_service
        .upsert_from_github(
            &github_user.login,
            &github_user.email_or_noreply(),
            &access_token,
        )
        .await?;

    info!(user = %user.github_username, "Owner logged in");

    let cookie = Cookie::build((AUTH_COOKIE, access_token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    let jar = CookieJar::new().add(cookie);

    Ok((jar, Redirect::to(&state.oauth.frontend_redirect())))
}
