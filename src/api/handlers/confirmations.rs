use axum::extract::{Path, State};
use axum::Json;
use metrics::counter;
use uuid::Uuid;

use crate::db::confirmation_repo;
use crate::errors::AppError;
use crate::models::TradeConfirmation;
use crate::AppState;

use super::strategies::ApiResponse;

/// GET /api/confirmations/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TradeConfirmation>>, AppError> {
    let confirmation = confirmation_repo::get_confirmation_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("confirmation not found".into()))?;

    Ok(Json(ApiResponse::ok(confirmation)))
}

/// PATCH /api/confirmations/{id} — record the consumer's outcome.
///
/// The body is validated before any write: `isExecuted` must be a JSON
/// boolean and `executionTxHash`, when present, a string. The update is
/// republished on the notification channel; consumers tell it apart from
/// creation by the executed flag and timestamps.
pub async fn mark_outcome(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<TradeConfirmation>>, AppError> {
    let is_executed = body
        .get("isExecuted")
        .ok_or_else(|| AppError::BadRequest("isExecuted is required".into()))?
        .as_bool()
        .ok_or_else(|| AppError::BadRequest("isExecuted must be a boolean".into()))?;

    let execution_tx_hash = match body.get("executionTxHash") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            return Err(AppError::BadRequest(
                "executionTxHash must be a string".into(),
            ))
        }
    };

    let confirmation = confirmation_repo::mark_outcome(&state.db, id, is_executed, execution_tx_hash)
        .await?
        .ok_or_else(|| AppError::NotFound("confirmation not found".into()))?;

    counter!("confirmation_updates_total").increment(1);
    tracing::info!(
        confirmation_id = %id,
        is_executed,
        "Confirmation outcome recorded"
    );

    state.bus.publish(confirmation.clone());

    Ok(Json(ApiResponse::ok_with_message(
        confirmation,
        "confirmation updated",
    )))
}
