use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the subscriptions table.
///
/// A partial unique index guarantees at most one active row per
/// (strategy, consumer) pair; unsubscribing flips `is_active` and keeps
/// the row as history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub strategy_id: Uuid,
    pub alpha_consumer_address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
