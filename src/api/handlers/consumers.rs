use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db::confirmation_repo;
use crate::errors::AppError;
use crate::models::{is_valid_address, TradeConfirmation};
use crate::AppState;

use super::strategies::ApiResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTradesQuery {
    pub alpha_consumer_address: String,
}

/// GET /api/consumer/pending-trades?alphaConsumerAddress=0x…
/// Confirmations awaiting consumer action (`isExecuted = false`).
pub async fn pending_trades(
    State(state): State<AppState>,
    Query(query): Query<PendingTradesQuery>,
) -> Result<Json<ApiResponse<Vec<TradeConfirmation>>>, AppError> {
    if !is_valid_address(&query.alpha_consumer_address) {
        return Err(AppError::BadRequest(
            "alphaConsumerAddress is not a valid address".into(),
        ));
    }

    let pending =
        confirmation_repo::get_pending_for_consumer(&state.db, &query.alpha_consumer_address)
            .await?;

    Ok(Json(ApiResponse::ok(pending)))
}
