use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// A known user, keyed by the identity provider's id. Rows are created on
/// first authenticated request and never hard-deleted.
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub external_id: String,
    pub name: String,
    pub email: Option<String>,
}
