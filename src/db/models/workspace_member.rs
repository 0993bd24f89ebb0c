use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::db::enums::MemberRole;

#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::workspace_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub role: MemberRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::workspace_members)]
pub struct NewWorkspaceMember {
    pub workspace_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
    pub role: MemberRole,
}

/// Shape expected by the direct-message roster on the client.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: MemberRole,
}

impl From<WorkspaceMember> for MemberInfo {
    fn from(m: WorkspaceMember) -> Self {
        Self {
            user_id: m.user_id,
            name: m.user_name,
            email: m.user_email,
            role: m.role,
        }
    }
}
