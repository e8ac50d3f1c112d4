use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Subscription;

/// Subscribe a consumer to a strategy.
///
/// Returns `None` when an active subscription for the pair already exists
/// (the partial unique index absorbs the insert). On success the strategy's
/// denormalized subscriber counter is bumped with a single atomic increment,
/// in the same transaction as the insert.
pub async fn subscribe(
    pool: &PgPool,
    strategy_id: Uuid,
    alpha_consumer_address: &str,
) -> anyhow::Result<Option<Subscription>> {
    let mut tx = pool.begin().await?;

    let subscription = sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (strategy_id, alpha_consumer_address)
        VALUES ($1, $2)
        ON CONFLICT (strategy_id, alpha_consumer_address) WHERE is_active DO NOTHING
        RETURNING *
        "#,
    )
    .bind(strategy_id)
    .bind(alpha_consumer_address)
    .fetch_optional(&mut *tx)
    .await?;

    if subscription.is_some() {
        sqlx::query(
            r#"
            UPDATE strategies
            SET subscriber_count = subscriber_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(strategy_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(subscription)
}

/// Deactivate a consumer's active subscription and decrement the counter.
/// Returns `false` when no active subscription existed.
pub async fn unsubscribe(
    pool: &PgPool,
    strategy_id: Uuid,
    alpha_consumer_address: &str,
) -> anyhow::Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE subscriptions
        SET is_active = false, updated_at = NOW()
        WHERE strategy_id = $1 AND alpha_consumer_address = $2 AND is_active
        "#,
    )
    .bind(strategy_id)
    .bind(alpha_consumer_address)
    .execute(&mut *tx)
    .await?;

    let deactivated = result.rows_affected() > 0;
    if deactivated {
        sqlx::query(
            r#"
            UPDATE strategies
            SET subscriber_count = GREATEST(subscriber_count - 1, 0), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(strategy_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(deactivated)
}

/// Fetch the active subscriptions for a strategy in stable creation order.
/// This is the fan-out snapshot: the broadcaster iterates exactly this list.
pub async fn get_active_subscriptions(
    pool: &PgPool,
    strategy_id: Uuid,
) -> anyhow::Result<Vec<Subscription>> {
    let subscriptions = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT * FROM subscriptions
        WHERE strategy_id = $1 AND is_active = true
        ORDER BY created_at ASC
        "#,
    )
    .bind(strategy_id)
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}
