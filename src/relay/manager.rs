use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};
use uuid::Uuid;

use crate::relay::events::ServerEvent;

pub type ConnectionId = Uuid;

/// Fan-out seam for the relay. The in-process implementation below is the
/// only one today; a broker-backed implementation can replace it without
/// touching the call sites.
#[async_trait]
pub trait FanOut: Send + Sync {
    /// Adds a connection to a channel's fan-out set. Idempotent.
    async fn subscribe(
        &self,
        channel_id: &str,
        connection_id: ConnectionId,
        tx: UnboundedSender<ServerEvent>,
    );

    async fn unsubscribe(&self, channel_id: &str, connection_id: ConnectionId);

    /// Removes a connection from every channel, called on disconnect.
    async fn unsubscribe_all(&self, connection_id: ConnectionId);

    /// Delivers an event to every connection subscribed to the channel,
    /// returning the number of connections reached. Subscribers of other
    /// channels never see the event.
    async fn broadcast(&self, channel_id: &str, event: ServerEvent) -> usize;
}

type Room = HashMap<ConnectionId, UnboundedSender<ServerEvent>>;

/// Process-local fan-out state. Does not survive restart and is not shared
/// across instances; horizontal scale needs a broker behind [`FanOut`].
#[derive(Clone, Default)]
pub struct RelayManager {
    rooms: Arc<RwLock<HashMap<String, Room>>>,
}

impl RelayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscriber_count(&self, channel_id: &str) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(channel_id).map_or(0, |room| room.len())
    }

    pub async fn channel_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn connection_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        let mut seen = std::collections::HashSet::new();
        for room in rooms.values() {
            seen.extend(room.keys().copied());
        }
        seen.len()
    }

    /// Drops subscriptions whose receiving task has gone away. Normal
    /// disconnects clean up via `unsubscribe_all`; this sweep catches
    /// connections that died without one.
    pub async fn prune_closed(&self) -> usize {
        let mut rooms = self.rooms.write().await;
        let mut pruned = 0;
        rooms.retain(|_, room| {
            let before = room.len();
            room.retain(|_, tx| !tx.is_closed());
            pruned += before - room.len();
            !room.is_empty()
        });
        if pruned > 0 {
            debug!(pruned, "Pruned closed relay connections");
        }
        pruned
    }
}

#[async_trait]
impl FanOut for RelayManager {
    async fn subscribe(
        &self,
        channel_id: &str,
        connection_id: ConnectionId,
        tx: UnboundedSender<ServerEvent>,
    ) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(channel_id.to_string())
            .or_default()
            .insert(connection_id, tx);
        debug!(%connection_id, channel_id, "Connection joined channel");
    }

    async fn unsubscribe(&self, channel_id: &str, connection_id: ConnectionId) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(channel_id) {
            room.remove(&connection_id);
            if room.is_empty() {
                rooms.remove(channel_id);
            }
        }
        debug!(%connection_id, channel_id, "Connection left channel");
    }

    async fn unsubscribe_all(&self, connection_id: ConnectionId) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, room| {
            room.remove(&connection_id);
            !room.is_empty()
        });
        info!(%connection_id, "Connection removed from all channels");
    }

    async fn broadcast(&self, channel_id: &str, event: ServerEvent) -> usize {
        let rooms = self.rooms.read().await;
        let Some(room) = rooms.get(channel_id) else {
            return 0;
        };

        let mut delivered = 0;
        for tx in room.values() {
            // A failed send means the receiver task is gone; the sweep
            // task removes the subscription.
            if tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}
