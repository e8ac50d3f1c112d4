use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the strategies table.
///
/// `subscriber_count` is denormalized and only ever moved by atomic
/// increment/decrement statements inside the subscribe/unsubscribe
/// transactions. Strategies are soft-deactivated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: Uuid,
    pub name: String,
    pub alpha_generator_address: String,
    pub protocols: Vec<String>,
    pub strategy_config: Option<serde_json::Value>,
    pub subscriber_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
