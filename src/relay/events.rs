use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::message::Message;

/// Frames sent by a connected client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinChannel(ChannelRef),
    LeaveChannel(ChannelRef),
    SendMessage(OutgoingMessage),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRef {
    pub channel_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
}

/// Frames sent to connected clients. The sender receives its own message
/// through `ReceiveMessage` like everyone else; there is no direct echo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    ReceiveMessage(MessageEnvelope),
    Error(ErrorEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub id: Uuid,
    pub channel_id: String,
    pub user_name: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub message: String,
}

impl From<Message> for MessageEnvelope {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            channel_id: m.channel_id,
            user_name: m.sender_name,
            message: m.content,
            timestamp: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_events_parse_the_wire_protocol() {
        let frame = json!({
            "event": "join-channel",
            "data": { "channelId": "general-1" }
        });
        let parsed: ClientEvent = serde_json::from_value(frame).unwrap();
        assert_eq!(
            parsed,
            ClientEvent::JoinChannel(ChannelRef {
                channel_id: "general-1".to_string()
            })
        );

        let frame = json!({
            "event": "send-message",
            "data": {
                "channelId": "general-1",
                "userId": "u1",
                "userName": "Alice",
                "message": "hello"
            }
        });
        let parsed: ClientEvent = serde_json::from_value(frame).unwrap();
        match parsed {
            ClientEvent::SendMessage(msg) => {
                assert_eq!(msg.channel_id, "general-1");
                assert_eq!(msg.user_name, "Alice");
                assert_eq!(msg.message, "hello");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn receive_message_envelope_uses_camel_case_fields() {
        let event = ServerEvent::ReceiveMessage(MessageEnvelope {
            id: Uuid::new_v4(),
            channel_id: "c1".to_string(),
            user_name: "Alice".to_string(),
            message: "hi".to_string(),
            timestamp: chrono::Utc::now(),
        });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "receive-message");
        assert!(value["data"]["channelId"].is_string());
        assert!(value["data"]["userName"].is_string());
        assert!(value["data"]["timestamp"].is_string());
    }
}
