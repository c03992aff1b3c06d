//! Full chain dump and integrity audit.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pc_02_chain_ledger::AuditReport;
use shared_types::ChainView;
use std::sync::Arc;

use super::AppState;
use crate::domain::error::{ApiError, ApiResult};

/// `GET /chain`: `{ Blocks, UsersState, ImagesState }`.
///
/// Serialized under the ledger's read lock, so blocks and state always
/// describe the same prefix of the chain.
pub async fn get_chain(State(state): State<AppState>) -> ApiResult<Response> {
    let body = state
        .ledger
        .with_view(|blocks, projection| {
            serde_json::to_vec(&ChainView {
                blocks,
                users: projection.users(),
                images: projection.images(),
            })
        })
        .map_err(|e| ApiError::internal(format!("chain serialization failed: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `GET /audit`: re-verify the persisted chain.
pub async fn audit(State(state): State<AppState>) -> ApiResult<Json<AuditReport>> {
    let ledger = Arc::clone(&state.ledger);
    let report = tokio::task::spawn_blocking(move || ledger.audit()).await??;
    Ok(Json(report))
}
