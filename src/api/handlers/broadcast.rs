use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::strategy_repo;
use crate::errors::AppError;
use crate::models::ExecutionParams;
use crate::services::broadcaster;
use crate::AppState;

use super::strategies::ApiResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub strategy_id: Uuid,
    pub execution_params: ExecutionParams,
    pub gas_estimate: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    pub created: usize,
    pub confirmation_ids: Vec<Uuid>,
}

/// POST /api/broadcast — fan an executed trade out to all active subscribers.
///
/// Unknown strategy is a 404 with zero writes. Zero subscribers is a
/// success with `created: 0`. Per-subscriber insert failures do not abort
/// the fan-out; the response carries only the created subset.
pub async fn broadcast(
    State(state): State<AppState>,
    Json(body): Json<BroadcastRequest>,
) -> Result<Json<ApiResponse<BroadcastResponse>>, AppError> {
    let strategy = strategy_repo::get_strategy_by_id(&state.db, body.strategy_id)
        .await?
        .ok_or_else(|| AppError::NotFound("strategy not found".into()))?;

    let outcome = broadcaster::fan_out(
        &state.db,
        &state.bus,
        &strategy,
        &body.execution_params,
        body.gas_estimate.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::ok_with_message(
        BroadcastResponse {
            created: outcome.created.len(),
            confirmation_ids: outcome.created,
        },
        "broadcast complete",
    )))
}
