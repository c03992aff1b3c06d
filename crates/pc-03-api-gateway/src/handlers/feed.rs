//! Read endpoints over the projection: feeds, search and activity.

use axum::extract::{Path, Query, State};
use axum::Json;
use pc_01_state_projection::{ActivityEntry, FeedEntry, FeedQuery};
use shared_types::UserProfile;

use super::AppState;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::SearchParams;

/// `GET /feed/{username}`
pub async fn home_feed(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<FeedEntry>>> {
    for_user(&state, &username, |query| query.home_feed(&username)).map(Json)
}

/// `GET /explore?q=`
pub async fn explore(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<FeedEntry>> {
    let entries = state.ledger.with_view(|blocks, projection| {
        FeedQuery::new(blocks, projection).explore(params.q.as_deref())
    });
    Json(entries)
}

/// `GET /users?q=`
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<UserProfile>> {
    let filter = params.q.unwrap_or_default();
    let users = state.ledger.with_view(|blocks, projection| {
        FeedQuery::new(blocks, projection)
            .search_users(&filter)
            .into_iter()
            .cloned()
            .collect()
    });
    Json(users)
}

/// `GET /users/{username}/posts`
pub async fn user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<FeedEntry>>> {
    for_user(&state, &username, |query| query.user_posts(&username)).map(Json)
}

/// `GET /users/{username}/activity`
pub async fn activity(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    for_user(&state, &username, |query| query.activity(&username)).map(Json)
}

/// Run a per-user query, or 404 if the user never registered.
fn for_user<R>(
    state: &AppState,
    username: &str,
    f: impl FnOnce(&FeedQuery<'_>) -> R,
) -> ApiResult<R> {
    state.ledger.with_view(|blocks, projection| {
        if projection.user(username).is_none() {
            return Err(ApiError::not_found(format!("user {username}")));
        }
        Ok(f(&FeedQuery::new(blocks, projection)))
    })
}
