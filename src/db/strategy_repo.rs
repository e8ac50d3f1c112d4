use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Strategy;

/// Register a new strategy for a generator.
pub async fn insert_strategy(
    pool: &PgPool,
    name: &str,
    alpha_generator_address: &str,
    protocols: &[String],
    strategy_config: Option<&serde_json::Value>,
) -> anyhow::Result<Strategy> {
    let strategy = sqlx::query_as::<_, Strategy>(
        r#"
        INSERT INTO strategies (name, alpha_generator_address, protocols, strategy_config)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(alpha_generator_address)
    .bind(protocols)
    .bind(strategy_config)
    .fetch_one(pool)
    .await?;

    Ok(strategy)
}

/// Fetch all active strategies, newest first.
pub async fn get_active_strategies(pool: &PgPool) -> anyhow::Result<Vec<Strategy>> {
    let strategies = sqlx::query_as::<_, Strategy>(
        "SELECT * FROM strategies WHERE is_active = true ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(strategies)
}

/// Fetch a strategy by id, active or not.
pub async fn get_strategy_by_id(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Strategy>> {
    let strategy = sqlx::query_as::<_, Strategy>("SELECT * FROM strategies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(strategy)
}

/// Soft-deactivate a strategy. Rows are never deleted.
pub async fn deactivate_strategy(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        "UPDATE strategies SET is_active = false, updated_at = NOW() WHERE id = $1 AND is_active",
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
