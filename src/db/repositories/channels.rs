use diesel::prelude::*;
use uuid::Uuid;

use crate::db::enums::ChannelType;
use crate::db::models::channel::{Channel, NewChannel};

pub struct ChannelsRepo;

/// Uniqueness key for a DM pair: the two participant ids, sorted.
/// Order-independent, so both participants resolve to the same channel.
pub fn dm_key(user_a: &str, user_b: &str) -> String {
    let (lo, hi) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{}:{}", lo, hi)
}

impl ChannelsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_channel: &NewChannel,
    ) -> Result<Channel, diesel::result::Error> {
        diesel::insert_into(crate::schema::channels::table)
            .values(new_channel)
            .get_result(conn)
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<Vec<Channel>, diesel::result::Error> {
        use crate::schema::channels::dsl::*;
        channels
            .filter(workspace_id.eq(ws_id))
            .order(created_at.asc())
            .load::<Channel>(conn)
    }

    pub fn find_dm(
        conn: &mut PgConnection,
        ws_id: Uuid,
        key: &str,
    ) -> Result<Option<Channel>, diesel::result::Error> {
        use crate::schema::channels::dsl::*;
        channels
            .filter(workspace_id.eq(ws_id))
            .filter(channel_type.eq(ChannelType::Dm))
            .filter(dm_key.eq(key))
            .first::<Channel>(conn)
            .optional()
    }

    /// Insert a DM channel unless the `(workspace, dm_key)` pair already
    /// exists. Returns `None` on conflict; the caller re-reads the winner.
    /// Safe when both participants initiate simultaneously.
    pub fn try_insert_dm(
        conn: &mut PgConnection,
        new_channel: &NewChannel,
    ) -> Result<Option<Channel>, diesel::result::Error> {
        use crate::schema::channels;
        diesel::insert_into(channels::table)
            .values(new_channel)
            .on_conflict((channels::workspace_id, channels::dm_key))
            .do_nothing()
            .get_result(conn)
            .optional()
    }

    pub fn ids_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<Vec<Uuid>, diesel::result::Error> {
        use crate::schema::channels::dsl::*;
        channels
            .filter(workspace_id.eq(ws_id))
            .select(id)
            .load::<Uuid>(conn)
    }

    pub fn delete_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::channels::dsl::*;
        diesel::delete(channels.filter(workspace_id.eq(ws_id))).execute(conn)
    }
}
