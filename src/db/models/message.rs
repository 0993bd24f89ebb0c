use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// A persisted chat message. Immutable after insertion.
///
/// `channel_id` is stored as a plain string rather than a foreign key so
/// that legacy numeric channel ids keep resolving to the same history.
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub channel_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::messages)]
pub struct NewMessage {
    pub channel_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
}
