use diesel::prelude::PgConnection;

use crate::{
    ai::GeminiClient,
    db::models::message::Message,
    error::{AppError, AppResult},
    services::messages_service::MessagesService,
    validation::document::validate_improve_content,
};

pub struct AiService;

pub struct GeneratedDocument {
    pub content: String,
    pub message_count: usize,
}

impl AiService {
    /// Turns a channel's recent history into a structured document. The
    /// provider is only called once there is at least one message.
    pub async fn generate_from_chat(
        conn: &mut PgConnection,
        client: &GeminiClient,
        channel_id: &str,
    ) -> AppResult<GeneratedDocument> {
        let messages = MessagesService::history(conn, channel_id)?;
        if messages.is_empty() {
            return Err(AppError::validation("No messages found in this channel"));
        }

        let transcript = format_transcript(&messages);
        let prompt = format!(
            "Summarize the following team chat transcript into a well-structured \
             document with headings and bullet points. Capture decisions, action \
             items and open questions. Respond with the document only.\n\n{}",
            transcript
        );

        let content = client.generate(&prompt).await?;
        Ok(GeneratedDocument {
            content,
            message_count: messages.len(),
        })
    }

    pub async fn improve_document(client: &GeminiClient, content: &str) -> AppResult<String> {
        validate_improve_content(content)?;

        let prompt = format!(
            "Improve the readability, grammar and structure of the following \
             document while preserving its meaning and formatting. Respond with \
             the improved document only.\n\n{}",
            content
        );

        client.generate(&prompt).await
    }
}

fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.sender_name, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn message(sender: &str, content: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            channel_id: "c1".to_string(),
            sender_id: sender.to_lowercase(),
            sender_name: sender.to_string(),
            content: content.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn transcript_is_one_line_per_message_in_order() {
        let messages = vec![message("Alice", "hi"), message("Bob", "hello")];
        assert_eq!(format_transcript(&messages), "Alice: hi\nBob: hello");
    }
}
