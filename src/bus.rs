use metrics::counter;
use tokio::sync::broadcast;

use crate::models::TradeConfirmation;

/// Process-wide notification channel for confirmation events, carried in
/// `AppState`. The message is a cloned confirmation row; creation and
/// outcome updates share the channel with no discriminator.
///
/// Dropping the returned receiver is the unsubscribe: it removes exactly
/// that listener and nothing else. There is no buffering across
/// subscriptions, so a receiver only observes events published after it
/// was created.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<TradeConfirmation>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver an event to every currently connected listener. Never blocks
    /// and never fails: zero listeners is a normal state, and a slow or dead
    /// receiver cannot affect the publisher or the other receivers.
    pub fn publish(&self, confirmation: TradeConfirmation) {
        counter!("notifications_published_total").increment(1);

        match self.tx.send(confirmation) {
            Ok(receivers) => {
                tracing::debug!(receivers, "Confirmation event published");
            }
            Err(_) => {
                tracing::debug!("Confirmation event published with no listeners");
            }
        }
    }

    /// Register a listener. The receiver sees only events published from
    /// this point on; drop it to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<TradeConfirmation> {
        self.tx.subscribe()
    }

    /// Number of currently registered listeners.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    use crate::models::{ExecutionParams, TradeAction};

    fn make_confirmation(consumer: &str) -> TradeConfirmation {
        TradeConfirmation {
            id: Uuid::new_v4(),
            strategy_id: Uuid::new_v4(),
            alpha_consumer_address: consumer.into(),
            execution_params: Json(ExecutionParams {
                protocol: "uniswap".into(),
                action: TradeAction::Swap,
                token_in: None,
                token_out: None,
                amount: None,
            }),
            gas_estimate: Some("200000".into()),
            is_executed: false,
            execution_tx_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_listeners_is_ok() {
        let bus = NotificationBus::new(16);
        // Must not panic or error out.
        bus.publish(make_confirmation("0xaaa"));
        assert_eq!(bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn test_all_listeners_receive_in_publish_order() {
        let bus = NotificationBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(make_confirmation("0xaaa"));
        bus.publish(make_confirmation("0xbbb"));

        for rx in [&mut rx1, &mut rx2] {
            let first = rx.recv().await.unwrap();
            let second = rx.recv().await.unwrap();
            assert_eq!(first.alpha_consumer_address, "0xaaa");
            assert_eq!(second.alpha_consumer_address, "0xbbb");
        }
    }

    #[tokio::test]
    async fn test_drop_unsubscribes_exactly_one_listener() {
        let bus = NotificationBus::new(16);
        let rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);

        // The remaining listener still gets events.
        bus.publish(make_confirmation("0xccc"));
        let got = rx2.recv().await.unwrap();
        assert_eq!(got.alpha_consumer_address, "0xccc");
    }

    #[tokio::test]
    async fn test_no_replay_for_late_subscribers() {
        let bus = NotificationBus::new(16);
        bus.publish(make_confirmation("0xaaa"));

        let mut late = bus.subscribe();
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));

        // Only events published after the subscription arrive.
        bus.publish(make_confirmation("0xbbb"));
        let got = late.recv().await.unwrap();
        assert_eq!(got.alpha_consumer_address, "0xbbb");
    }
}
