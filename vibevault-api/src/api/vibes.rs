//! Mood matcher endpoints
//!
//! The vocabulary is whatever the user has tagged; matching is exact and
//! case-sensitive.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use vibevault_common::finder;
use vibevault_common::{MediaItem, MediaStatus, MediaType};

use super::CurrentUser;
use crate::error::ApiResult;
use crate::AppState;

/// Optional secondary filters for a mood match
#[derive(Debug, Default, Deserialize)]
pub struct VibeMatchQuery {
    pub status: Option<MediaStatus>,
    #[serde(rename = "type")]
    pub kind: Option<MediaType>,
}

/// GET /api/vibes
pub async fn list_vibes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<String>>> {
    let items = state.store.list_items(&user).await?;
    Ok(Json(finder::distinct_tags(&items)))
}

/// GET /api/vibes/:tag/media?status=&type=
pub async fn vibe_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(tag): Path<String>,
    query: Result<Query<VibeMatchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MediaItem>>> {
    let Query(query) = query?;
    let items = state.store.list_items(&user).await?;
    let matches = finder::match_by_tag(&items, &tag, query.status.into(), query.kind.into());
    Ok(Json(matches.into_iter().cloned().collect()))
}

/// Build mood matcher routes
pub fn vibe_routes() -> Router<AppState> {
    Router::new()
        .route("/api/vibes", get(list_vibes))
        .route("/api/vibes/:tag/media", get(vibe_media))
}
