use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::db::enums::ChannelType;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::channels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub participants: Vec<String>,
    // Internal uniqueness key for DM pairs, not part of the API shape
    #[serde(skip_serializing)]
    pub dm_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::channels)]
pub struct NewChannel {
    pub workspace_id: Uuid,
    pub name: String,
    pub channel_type: ChannelType,
    pub participants: Vec<String>,
    pub dm_key: Option<String>,
}
