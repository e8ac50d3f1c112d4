use metrics::counter;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bus::NotificationBus;
use crate::db::{confirmation_repo, subscription_repo};
use crate::models::{ExecutionParams, Strategy};

/// Result of one broadcast fan-out.
#[derive(Debug)]
pub struct BroadcastOutcome {
    /// Ids of the confirmation rows actually created, in subscriber order.
    pub created: Vec<Uuid>,
    /// Subscribers for which the insert failed.
    pub failed: usize,
}

/// Fan an executed trade out to every active subscriber of a strategy.
///
/// The subscriber list is loaded once up front; subscriptions changing
/// mid-call do not affect this broadcast. Each subscriber gets one
/// confirmation row followed by one bus event, in list order. Inserts are
/// independent: a failure for one subscriber is logged and counted, prior
/// rows stand, and the loop moves on. The caller reports only the created
/// subset.
pub async fn fan_out(
    pool: &PgPool,
    bus: &NotificationBus,
    strategy: &Strategy,
    execution_params: &ExecutionParams,
    gas_estimate: Option<&str>,
) -> anyhow::Result<BroadcastOutcome> {
    counter!("broadcasts_total").increment(1);

    let subscriptions = subscription_repo::get_active_subscriptions(pool, strategy.id).await?;

    if subscriptions.is_empty() {
        tracing::info!(strategy_id = %strategy.id, "Broadcast with no active subscribers");
        return Ok(BroadcastOutcome {
            created: Vec::new(),
            failed: 0,
        });
    }

    let mut created = Vec::with_capacity(subscriptions.len());
    let mut failed = 0usize;

    for subscription in &subscriptions {
        match confirmation_repo::insert_confirmation(
            pool,
            strategy.id,
            &subscription.alpha_consumer_address,
            execution_params,
            gas_estimate,
        )
        .await
        {
            Ok(confirmation) => {
                created.push(confirmation.id);
                counter!("confirmations_created_total").increment(1);
                bus.publish(confirmation);
            }
            Err(e) => {
                failed += 1;
                counter!("confirmations_failed_total").increment(1);
                tracing::error!(
                    error = %e,
                    strategy_id = %strategy.id,
                    consumer = %subscription.alpha_consumer_address,
                    "Failed to create trade confirmation"
                );
            }
        }
    }

    tracing::info!(
        strategy_id = %strategy.id,
        created = created.len(),
        failed,
        "Broadcast fan-out complete"
    );

    Ok(BroadcastOutcome { created, failed })
}
