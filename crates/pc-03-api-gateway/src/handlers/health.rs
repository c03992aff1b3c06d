use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::domain::types::HealthResponse;

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let halted = state.ledger.is_halted();
    Json(HealthResponse {
        status: if halted { "halted" } else { "ok" }.to_string(),
        blocks: state.ledger.len(),
        tip_hash: state.ledger.tip_hash(),
        halted,
    })
}
