use tokio::sync::mpsc;
use uuid::Uuid;

use super::events::{MessageEnvelope, ServerEvent};
use super::manager::{FanOut, RelayManager};

fn envelope(channel_id: &str, message: &str) -> ServerEvent {
    ServerEvent::ReceiveMessage(MessageEnvelope {
        id: Uuid::new_v4(),
        channel_id: channel_id.to_string(),
        user_name: "Alice".to_string(),
        message: message.to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[tokio::test]
async fn broadcast_reaches_only_the_target_channel() {
    let manager = RelayManager::new();
    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();

    manager.subscribe("general", Uuid::new_v4(), tx_a).await;
    manager.subscribe("random", Uuid::new_v4(), tx_b).await;

    let delivered = manager.broadcast("general", envelope("general", "hi")).await;
    assert_eq!(delivered, 1);

    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn resubscribing_the_same_connection_is_idempotent() {
    let manager = RelayManager::new();
    let connection_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::unbounded_channel();

    manager.subscribe("general", connection_id, tx.clone()).await;
    manager.subscribe("general", connection_id, tx).await;
    assert_eq!(manager.subscriber_count("general").await, 1);

    manager.broadcast("general", envelope("general", "once")).await;
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn unsubscribed_connections_stop_receiving() {
    let manager = RelayManager::new();
    let connection_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::unbounded_channel();

    manager.subscribe("general", connection_id, tx).await;
    manager.unsubscribe("general", connection_id).await;

    let delivered = manager.broadcast("general", envelope("general", "hi")).await;
    assert_eq!(delivered, 0);
    assert!(rx.try_recv().is_err());
    assert_eq!(manager.channel_count().await, 0);
}

#[tokio::test]
async fn disconnect_removes_the_connection_from_every_channel() {
    let manager = RelayManager::new();
    let connection_id = Uuid::new_v4();
    let (tx, _rx) = mpsc::unbounded_channel();

    manager.subscribe("general", connection_id, tx.clone()).await;
    manager.subscribe("random", connection_id, tx).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.unsubscribe_all(connection_id).await;
    assert_eq!(manager.connection_count().await, 0);
    assert_eq!(manager.channel_count().await, 0);
}

#[tokio::test]
async fn sweep_drops_subscriptions_with_closed_receivers() {
    let manager = RelayManager::new();
    let live_id = Uuid::new_v4();
    let (live_tx, _live_rx) = mpsc::unbounded_channel();
    let (dead_tx, dead_rx) = mpsc::unbounded_channel();

    manager.subscribe("general", live_id, live_tx).await;
    manager.subscribe("general", Uuid::new_v4(), dead_tx).await;
    drop(dead_rx);

    let pruned = manager.prune_closed().await;
    assert_eq!(pruned, 1);
    assert_eq!(manager.subscriber_count("general").await, 1);
}
