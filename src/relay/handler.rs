use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthService,
    relay::events::{ClientEvent, ErrorEvent, OutgoingMessage, ServerEvent},
    relay::manager::{ConnectionId, FanOut, RelayManager},
    services::messages_service::MessagesService,
};

#[derive(Clone)]
pub struct RelayState {
    pub db: Arc<DbPool>,
    pub manager: Arc<RelayManager>,
    pub jwt_secret: String,
}

// `token` is optional at the extractor level so that a missing parameter
// fails token verification (401) instead of query deserialization (400).
#[derive(Deserialize, Default)]
pub struct RelayAuthQuery {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(serde::Serialize)]
pub struct RelayStats {
    pub channels: usize,
    pub connections: usize,
}

pub struct RelayHandler;

impl RelayHandler {
    /// Upgrade endpoint. The token query parameter must carry a valid JWT;
    /// message payloads name their own sender, the connection itself is
    /// what gets authenticated.
    pub async fn websocket_handler(
        ws: WebSocketUpgrade,
        Query(query): Query<RelayAuthQuery>,
        State(state): State<RelayState>,
    ) -> axum::response::Result<Response> {
        let auth = AuthService::new(state.jwt_secret.clone());
        let token = query.token.unwrap_or_default();
        let claims = auth.verify_token(&token).map_err(|e| {
            warn!("WebSocket authentication failed: {}", e);
            (StatusCode::UNAUTHORIZED, "Invalid token")
        })?;

        info!(user = %claims.sub, "WebSocket upgrade request");
        Ok(ws.on_upgrade(move |socket| Self::handle_socket(socket, state)))
    }

    async fn handle_socket(socket: WebSocket, state: RelayState) {
        let connection_id: ConnectionId = Uuid::new_v4();
        let (mut sink, mut stream) = socket.split();

        // Outbound events funnel through one mpsc channel per connection;
        // the fan-out sets hold clones of its sender.
        let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

        let send_task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let Ok(text) = serde_json::to_string(&event) else {
                    continue;
                };
                if sink.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        });

        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => Self::handle_event(&state, connection_id, &tx, event).await,
                    Err(e) => {
                        debug!(%connection_id, "Unparseable frame: {}", e);
                        let _ = tx.send(ServerEvent::Error(ErrorEvent {
                            message: "Unrecognized event".to_string(),
                        }));
                    }
                },
                Ok(Message::Close(_)) => {
                    info!(%connection_id, "WebSocket connection closed");
                    break;
                }
                Err(e) => {
                    error!(%connection_id, "WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        state.manager.unsubscribe_all(connection_id).await;
        send_task.abort();
    }

    async fn handle_event(
        state: &RelayState,
        connection_id: ConnectionId,
        tx: &UnboundedSender<ServerEvent>,
        event: ClientEvent,
    ) {
        match event {
            ClientEvent::JoinChannel(channel) => {
                state
                    .manager
                    .subscribe(&channel.channel_id, connection_id, tx.clone())
                    .await;
            }
            ClientEvent::LeaveChannel(channel) => {
                state
                    .manager
                    .unsubscribe(&channel.channel_id, connection_id)
                    .await;
            }
            ClientEvent::SendMessage(msg) => {
                Self::handle_send(state, tx, msg).await;
            }
        }
    }

    /// Persist, then fan out. A message that could not be stored is not
    /// broadcast; the sender alone is told the send failed, so history
    /// and live delivery never disagree.
    async fn handle_send(
        state: &RelayState,
        tx: &UnboundedSender<ServerEvent>,
        msg: OutgoingMessage,
    ) {
        let persisted = state.db.get().map_err(AppError::from).and_then(|mut conn| {
            MessagesService::record(
                &mut conn,
                &msg.channel_id,
                &msg.user_id,
                &msg.user_name,
                &msg.message,
            )
        });

        match persisted {
            Ok(message) => {
                let channel_id = message.channel_id.clone();
                let delivered = state
                    .manager
                    .broadcast(&channel_id, ServerEvent::ReceiveMessage(message.into()))
                    .await;
                debug!(channel_id, delivered, "Message broadcast");
            }
            Err(e) => {
                error!(channel_id = %msg.channel_id, "Failed to persist message: {}", e);
                let _ = tx.send(ServerEvent::Error(ErrorEvent {
                    message: "Message could not be delivered".to_string(),
                }));
            }
        }
    }

    pub async fn get_relay_stats(State(state): State<RelayState>) -> axum::Json<RelayStats> {
        axum::Json(RelayStats {
            channels: state.manager.channel_count().await,
            connections: state.manager.connection_count().await,
        })
    }
}
