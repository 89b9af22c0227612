//! Public viewer handlers — token-only access to shared repositories.
//!
//! Every route runs the full access gate evaluation before touching the
//! content proxy, so each call consumes one view. A fetch failure after the
//! grant does not refund the consumed view.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;

use privycode_core::error::AppError;

use crate::dto::request::ViewerPathQuery;
use crate::dto::response::{ApiResponse, ViewerInfoResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/view/{token}
pub async fn resolve_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ViewerInfoResponse>>, ApiError> {
    let grant = state.access_gate.evaluate(&token, Utc::now()).await?;

    let summary = state
        .content
        .get_repo_summary(&grant.credential, &grant.github_username, &grant.repo_name)
        .await?;

    Ok(Json(ApiResponse::ok(ViewerInfoResponse {
        github_username: summary.owner,
        repo_name: summary.repo,
    })))
}

/// GET /api/view/{token}/contents?path=
pub async fn list_contents(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<ViewerPathQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let grant = state.access_gate.evaluate(&token, Utc::now()).await?;

    let path = query.path.unwrap_or_default();
    let entries = state
        .content
        .list_directory(
            &grant.credential,
            &grant.github_username,
            &grant.repo_name,
            &path,
        )
        .await?;

    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/view/{token}/raw?path=
pub async fn raw_file(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<ViewerPathQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let path = query
        .path
        .filter(|path| !path.is_empty())
        .ok_or_else(|| AppError::validation("Missing file path"))?;

    let grant = state.access_gate.evaluate(&token, Utc::now()).await?;

    let bytes = state
        .content
        .read_file(
            &grant.credential,
            &grant.github_username,
            &grant.repo_name,
            &path,
        )
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bytes,
    ))
}
