//! Owner profile handlers.

use axum::Json;

use crate::dto::response::{ApiResponse, MeResponse};
use crate::extractors::AuthOwner;

/// GET /api/auth/me
pub async fn me(auth: AuthOwner) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::ok(MeResponse {
        github_username: auth.github_username.clone(),
        email: auth.email.clone(),
    }))
}
