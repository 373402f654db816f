//! Media CRUD endpoints
//!
//! | Method | Path            | Success            |
//! |--------|-----------------|--------------------|
//! | GET    | /api/media      | 200, array         |
//! | POST   | /api/media      | 201, created item  |
//! | PATCH  | /api/media/:id  | 200, updated item  |
//! | DELETE | /api/media/:id  | 204                |
//! | GET    | /api/media/stats| 200, type counts   |

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::info;
use vibevault_common::library::LibraryFilter;
use vibevault_common::stats::LibraryStats;
use vibevault_common::{MediaItem, MediaPatch, NewMedia};

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/media?category=&status=&q=
///
/// Without query parameters this is the full list in store order.
pub async fn list_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<LibraryFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<MediaItem>>> {
    let Query(filter) = query?;
    let items = state.store.list_items(&user).await?;

    if filter == LibraryFilter::default() {
        return Ok(Json(items));
    }
    Ok(Json(filter.apply(&items).into_iter().cloned().collect()))
}

/// POST /api/media
pub async fn create_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewMedia>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MediaItem>)> {
    let Json(draft) = payload?;
    let item = state.store.create_item(&user, draft).await?;
    info!("Created media {} ({}) for {}", item.id, item.kind, user);
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/media/:id
pub async fn update_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<MediaPatch>, JsonRejection>,
) -> ApiResult<Json<MediaItem>> {
    let Json(patch) = payload?;
    let item = state.store.update_item(&user, &id, patch).await?;
    Ok(Json(item))
}

/// DELETE /api/media/:id
pub async fn delete_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_item(&user, &id).await?;
    info!("Deleted media {} for {}", id, user);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/media/stats
pub async fn media_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<LibraryStats>> {
    let items = state.store.list_items(&user).await?;
    Ok(Json(LibraryStats::from_items(&items)))
}

/// Build media routes
pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/api/media", get(list_media).post(create_media))
        .route("/api/media/stats", get(media_stats))
        .route("/api/media/:id", patch(update_media).delete(delete_media))
}
