pub mod events;
pub mod handler;
pub mod manager;

#[cfg(test)]
mod tests;

pub use events::{ChannelRef, ClientEvent, ErrorEvent, MessageEnvelope, OutgoingMessage, ServerEvent};
pub use handler::{RelayHandler, RelayState, RelayStats};
pub use manager::{ConnectionId, FanOut, RelayManager};

use crate::config::Config;
use crate::db::DbPool;
use std::sync::Arc;

pub fn create_relay_state(db: Arc<DbPool>, config: &Config) -> RelayState {
    RelayState {
        db,
        manager: Arc::new(RelayManager::new()),
        jwt_secret: config.jwt_secret.clone(),
    }
}

pub fn create_relay_routes() -> axum::Router<RelayState> {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws", get(RelayHandler::websocket_handler))
        .route("/ws/stats", get(RelayHandler::get_relay_stats))
}

/// Background task that periodically drops subscriptions whose connection
/// died without a clean disconnect.
pub async fn start_sweep_task(manager: Arc<RelayManager>) {
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));

    loop {
        interval.tick().await;
        manager.prune_closed().await;
    }
}
