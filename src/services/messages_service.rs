use diesel::prelude::PgConnection;

use crate::{
    db::models::message::{Message, NewMessage},
    db::repositories::messages::MessagesRepo,
    error::AppError,
    validation::message::validate_send,
};

/// History reads never return more than this many messages; older ones
/// fall out of the window and are unrecoverable through this API.
pub const HISTORY_LIMIT: i64 = 100;

pub struct MessagesService;

impl MessagesService {
    pub fn record(
        conn: &mut PgConnection,
        channel_id: &str,
        sender_id: &str,
        sender_name: &str,
        content: &str,
    ) -> Result<Message, AppError> {
        validate_send(channel_id, content)?;
        let message = MessagesRepo::insert(
            conn,
            &NewMessage {
                channel_id: channel_id.to_string(),
                sender_id: sender_id.to_string(),
                sender_name: sender_name.to_string(),
                content: content.to_string(),
            },
        )?;
        Ok(message)
    }

    /// Up to the 100 most recent messages, ascending by creation time, for
    /// backfilling a newly joined client before live delivery starts.
    pub fn history(conn: &mut PgConnection, channel_id: &str) -> Result<Vec<Message>, AppError> {
        let mut messages = MessagesRepo::recent(conn, channel_id, HISTORY_LIMIT)?;
        messages.reverse();
        Ok(messages)
    }
}
