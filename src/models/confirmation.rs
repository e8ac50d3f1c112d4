use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::TradeAction;

/// Execution parameters carried by a broadcast trade. The payload is stored
/// as JSONB and passed through to subscribers unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionParams {
    pub protocol: String,
    pub action: TradeAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// Database row for the trade_confirmations table — one per
/// (broadcast, subscriber). Rows are created in batch by the broadcaster
/// and mutated by the lifecycle endpoint; they are never deleted.
///
/// A clone of this row is also the notification bus message: stream
/// consumers tell creation from outcome updates by `is_executed` and the
/// timestamps, there is no separate event-type field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TradeConfirmation {
    pub id: Uuid,
    pub strategy_id: Uuid,
    pub alpha_consumer_address: String,
    pub execution_params: Json<ExecutionParams>,
    pub gas_estimate: Option<String>,
    pub is_executed: bool,
    pub execution_tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
