mod common;

use alphastream::bus::NotificationBus;
use alphastream::db::{confirmation_repo, subscription_repo};
use alphastream::services::broadcaster;

const CONSUMER_A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const CONSUMER_B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const GENERATOR: &str = "0x1111111111111111111111111111111111111111";

#[tokio::test]
async fn test_fan_out_creates_one_confirmation_per_subscriber() {
    let pool = common::setup_test_db().await;
    let bus = NotificationBus::new(16);

    let strategy = common::seed_strategy(&pool, "momentum_eth", GENERATOR).await;
    common::seed_subscription(&pool, strategy.id, CONSUMER_A).await;
    common::seed_subscription(&pool, strategy.id, CONSUMER_B).await;

    // Listener connected before the broadcast sees every event.
    let mut rx = bus.subscribe();

    let outcome = broadcaster::fan_out(&pool, &bus, &strategy, &common::sample_params(), Some("200000"))
        .await
        .expect("Fan-out should succeed");

    assert_eq!(outcome.created.len(), 2);
    assert_eq!(outcome.failed, 0);

    // One bus event per created row, in subscriber-creation order.
    let first = rx.recv().await.expect("First event should arrive");
    let second = rx.recv().await.expect("Second event should arrive");
    assert_eq!(first.alpha_consumer_address, CONSUMER_A);
    assert_eq!(second.alpha_consumer_address, CONSUMER_B);
    assert_eq!(first.id, outcome.created[0]);
    assert_eq!(second.id, outcome.created[1]);
    assert!(!first.is_executed);
    assert_eq!(first.gas_estimate.as_deref(), Some("200000"));
    assert_eq!(first.execution_params.protocol, "uniswap");

    // The rows are persisted and pending.
    for id in &outcome.created {
        let row = confirmation_repo::get_confirmation_by_id(&pool, *id)
            .await
            .expect("DB query should succeed")
            .expect("Confirmation row should exist");
        assert_eq!(row.strategy_id, strategy.id);
        assert!(!row.is_executed);
    }
}

#[tokio::test]
async fn test_fan_out_with_zero_subscribers_is_success() {
    let pool = common::setup_test_db().await;
    let bus = NotificationBus::new(16);

    let strategy = common::seed_strategy(&pool, "lonely_strategy", GENERATOR).await;

    let outcome = broadcaster::fan_out(&pool, &bus, &strategy, &common::sample_params(), None)
        .await
        .expect("Zero subscribers is not an error");

    assert!(outcome.created.is_empty());
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn test_fan_out_snapshots_subscribers_at_call_time() {
    let pool = common::setup_test_db().await;
    let bus = NotificationBus::new(16);

    let strategy = common::seed_strategy(&pool, "snapshot_strategy", GENERATOR).await;
    common::seed_subscription(&pool, strategy.id, CONSUMER_A).await;

    let outcome = broadcaster::fan_out(&pool, &bus, &strategy, &common::sample_params(), None)
        .await
        .expect("Fan-out should succeed");
    assert_eq!(outcome.created.len(), 1);

    // A subscriber added after the broadcast gets nothing retroactively.
    common::seed_subscription(&pool, strategy.id, CONSUMER_B).await;
    let pending = confirmation_repo::get_pending_for_consumer(&pool, CONSUMER_B)
        .await
        .expect("DB query should succeed");
    assert!(pending.is_empty());
}

#[tokio::test]
async fn test_deactivated_subscribers_are_skipped() {
    let pool = common::setup_test_db().await;
    let bus = NotificationBus::new(16);

    let strategy = common::seed_strategy(&pool, "churn_strategy", GENERATOR).await;
    common::seed_subscription(&pool, strategy.id, CONSUMER_A).await;
    common::seed_subscription(&pool, strategy.id, CONSUMER_B).await;

    let removed = subscription_repo::unsubscribe(&pool, strategy.id, CONSUMER_B)
        .await
        .expect("Unsubscribe should succeed");
    assert!(removed);

    let outcome = broadcaster::fan_out(&pool, &bus, &strategy, &common::sample_params(), None)
        .await
        .expect("Fan-out should succeed");

    assert_eq!(outcome.created.len(), 1);
    let row = confirmation_repo::get_confirmation_by_id(&pool, outcome.created[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.alpha_consumer_address, CONSUMER_A);
}

#[tokio::test]
async fn test_subscribe_is_unique_per_active_pair() {
    let pool = common::setup_test_db().await;

    let strategy = common::seed_strategy(&pool, "unique_strategy", GENERATOR).await;

    let first = subscription_repo::subscribe(&pool, strategy.id, CONSUMER_A)
        .await
        .expect("Subscribe should succeed");
    assert!(first.is_some());

    // Second active subscription for the same pair is absorbed.
    let second = subscription_repo::subscribe(&pool, strategy.id, CONSUMER_A)
        .await
        .expect("DB query should succeed");
    assert!(second.is_none());

    // Counter was bumped exactly once.
    let strategy = alphastream::db::strategy_repo::get_strategy_by_id(&pool, strategy.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(strategy.subscriber_count, 1);

    // After unsubscribing, the pair can subscribe again.
    subscription_repo::unsubscribe(&pool, strategy.id, CONSUMER_A)
        .await
        .expect("Unsubscribe should succeed");
    let again = subscription_repo::subscribe(&pool, strategy.id, CONSUMER_A)
        .await
        .expect("Subscribe should succeed");
    assert!(again.is_some());
}

#[tokio::test]
async fn test_mark_outcome_updates_row_and_keeps_history() {
    let pool = common::setup_test_db().await;

    let strategy = common::seed_strategy(&pool, "outcome_strategy", GENERATOR).await;
    let confirmation = confirmation_repo::insert_confirmation(
        &pool,
        strategy.id,
        CONSUMER_A,
        &common::sample_params(),
        Some("150000"),
    )
    .await
    .expect("Insert should succeed");

    let updated = confirmation_repo::mark_outcome(&pool, confirmation.id, true, Some("0xdeadbeef"))
        .await
        .expect("Update should succeed")
        .expect("Row should exist");

    assert!(updated.is_executed);
    assert_eq!(updated.execution_tx_hash.as_deref(), Some("0xdeadbeef"));
    assert!(updated.updated_at >= confirmation.updated_at);

    // No longer pending for the consumer.
    let pending = confirmation_repo::get_pending_for_consumer(&pool, CONSUMER_A)
        .await
        .expect("DB query should succeed");
    assert!(pending.iter().all(|c| c.id != confirmation.id));
}
