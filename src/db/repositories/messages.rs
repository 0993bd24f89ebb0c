use diesel::prelude::*;

use crate::db::models::message::{Message, NewMessage};

pub struct MessagesRepo;

impl MessagesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_message: &NewMessage,
    ) -> Result<Message, diesel::result::Error> {
        diesel::insert_into(crate::schema::messages::table)
            .values(new_message)
            .get_result(conn)
    }

    /// The `limit` most recent messages for a channel, newest first.
    /// Callers wanting chronological order reverse the result.
    pub fn recent(
        conn: &mut PgConnection,
        channel: &str,
        limit: i64,
    ) -> Result<Vec<Message>, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        messages
            .filter(channel_id.eq(channel))
            .order(created_at.desc())
            .limit(limit)
            .load::<Message>(conn)
    }

    pub fn delete_by_channels(
        conn: &mut PgConnection,
        channel_ids: &[String],
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::messages::dsl::*;
        diesel::delete(messages.filter(channel_id.eq_any(channel_ids))).execute(conn)
    }
}
