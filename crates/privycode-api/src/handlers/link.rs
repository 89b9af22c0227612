//! Owner-facing viewer link handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use privycode_core::error::AppError;
use privycode_core::types::{PageRequest, PageResponse};

use crate::dto::request::{CreateLinkRequest, UpdateLinkRequest};
use crate::dto::response::{ApiResponse, LinkResponse};
use crate::error::ApiError;
use crate::extractors::AuthOwner;
use crate::state::AppState;

/// GET /api/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<LinkResponse>>>, ApiError> {
    let page_result = state.link_service.list_links(&auth, &page).await?;

    let items = page_result
        .items
        .into_iter()
        .map(|link| {
            let viewer_url = state.link_service.viewer_url(&link.token);
            LinkResponse::from_link(link, viewer_url)
        })
        .collect();
    let response = PageResponse {
        items,
        page: page_result.page,
        page_size: page_result.page_size,
        total_items: page_result.total_items,
        total_pages: page_result.total_pages,
        has_next: page_result.has_next,
        has_previous: page_result.has_previous,
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LinkResponse>>), ApiError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let issued = state
        .link_service
        .create_link(
            &auth,
            privycode_service::link::CreateLinkRequest {
                repo_name: request.repo_name,
                expires_in_days: request.expires_in_days,
                max_views: request.max_views,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(LinkResponse::from(issued))),
    ))
}

/// GET /api/links/{id}
pub async fn get_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LinkResponse>>, ApiError> {
    let link = state.link_service.get_link(&auth, id).await?;
    let viewer_url = state.link_service.viewer_url(&link.token);
    Ok(Json(ApiResponse::ok(LinkResponse::from_link(
        link, viewer_url,
    ))))
}

/// PUT /api/links/{id}
pub async fn update_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLinkRequest>,
) -> Result<Json<ApiResponse<LinkResponse>>, ApiError> {
    let link = state
        .link_service
        .update_link(
            &auth,
            id,
            privycode_service::link::UpdateLinkRequest {
                expires_in_days: request.expires_in_days,
                max_views: request.max_views,
            },
        )
        .await?;

    let viewer_url = state.link_service.viewer_url(&link.token);
    Ok(Json(ApiResponse::ok(LinkResponse::from_link(
        link, viewer_url,
    ))))
}

/// DELETE /api/links/{id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.link_service.delete_link(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Viewer link deleted" }),
    )))
}
