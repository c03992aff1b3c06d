//! Write endpoints: `/transact` and `/register`.

use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use shared_types::{Action, Block, LedgerError, Transaction};
use std::sync::Arc;

use super::AppState;
use crate::domain::error::ApiResult;
use crate::domain::types::{RegisterRequest, TransactRequest, TransactResponse};

/// `POST /transact`
pub async fn transact(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<TransactResponse>> {
    let request: TransactRequest = serde_json::from_slice(&body)?;
    let transaction = request.into_transaction().map_err(LedgerError::from)?;
    let block = submit(&state, transaction).await?;
    Ok(Json(TransactResponse::from(&block)))
}

/// `POST /register`: shorthand for a REGISTER_USER transaction.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<TransactResponse>> {
    let request: RegisterRequest = serde_json::from_slice(&body)?;
    let block = submit(&state, Transaction::new(request.sender, Action::RegisterUser)).await?;
    Ok(Json(TransactResponse::from(&block)))
}

/// Ledger writes block on file I/O and the scorer, so they run off the
/// async workers.
async fn submit(state: &AppState, transaction: Transaction) -> ApiResult<Block> {
    let ledger = Arc::clone(&state.ledger);
    let block = tokio::task::spawn_blocking(move || ledger.submit(transaction)).await??;
    Ok(block)
}
