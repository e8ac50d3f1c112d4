use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ExecutionParams, TradeConfirmation};

/// Insert one confirmation row for a subscriber of a broadcast trade.
pub async fn insert_confirmation(
    pool: &PgPool,
    strategy_id: Uuid,
    alpha_consumer_address: &str,
    execution_params: &ExecutionParams,
    gas_estimate: Option<&str>,
) -> anyhow::Result<TradeConfirmation> {
    let confirmation = sqlx::query_as::<_, TradeConfirmation>(
        r#"
        INSERT INTO trade_confirmations (strategy_id, alpha_consumer_address, execution_params, gas_estimate)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(strategy_id)
    .bind(alpha_consumer_address)
    .bind(Json(execution_params))
    .bind(gas_estimate)
    .fetch_one(pool)
    .await?;

    Ok(confirmation)
}

/// Fetch a confirmation by id.
pub async fn get_confirmation_by_id(
    pool: &PgPool,
    id: Uuid,
) -> anyhow::Result<Option<TradeConfirmation>> {
    let confirmation =
        sqlx::query_as::<_, TradeConfirmation>("SELECT * FROM trade_confirmations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(confirmation)
}

/// Record the consumer's outcome for a confirmation. Repeated calls are
/// accepted; the latest write wins. Returns `None` for an unknown id.
pub async fn mark_outcome(
    pool: &PgPool,
    id: Uuid,
    is_executed: bool,
    execution_tx_hash: Option<&str>,
) -> anyhow::Result<Option<TradeConfirmation>> {
    let confirmation = sqlx::query_as::<_, TradeConfirmation>(
        r#"
        UPDATE trade_confirmations
        SET is_executed = $2,
            execution_tx_hash = COALESCE($3, execution_tx_hash),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(is_executed)
    .bind(execution_tx_hash)
    .fetch_optional(pool)
    .await?;

    Ok(confirmation)
}

/// Pending confirmations (not yet executed) for a consumer, newest first.
pub async fn get_pending_for_consumer(
    pool: &PgPool,
    alpha_consumer_address: &str,
) -> anyhow::Result<Vec<TradeConfirmation>> {
    let confirmations = sqlx::query_as::<_, TradeConfirmation>(
        r#"
        SELECT * FROM trade_confirmations
        WHERE alpha_consumer_address = $1 AND is_executed = false
        ORDER BY created_at DESC
        "#,
    )
    .bind(alpha_consumer_address)
    .fetch_all(pool)
    .await?;

    Ok(confirmations)
}
