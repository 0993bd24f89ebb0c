use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::workspace_member::{NewWorkspaceMember, WorkspaceMember};

pub struct MembersRepo;

impl MembersRepo {
    /// Inserts a membership, returning `None` when the `(workspace, user)`
    /// pair already exists. The unique index makes concurrent joins safe.
    pub fn insert(
        conn: &mut PgConnection,
        new_member: &NewWorkspaceMember,
    ) -> Result<Option<WorkspaceMember>, diesel::result::Error> {
        use crate::schema::workspace_members;
        diesel::insert_into(workspace_members::table)
            .values(new_member)
            .on_conflict((workspace_members::workspace_id, workspace_members::user_id))
            .do_nothing()
            .get_result(conn)
            .optional()
    }

    pub fn find(
        conn: &mut PgConnection,
        ws_id: Uuid,
        member_user_id: &str,
    ) -> Result<Option<WorkspaceMember>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws_id))
            .filter(user_id.eq(member_user_id))
            .first::<WorkspaceMember>(conn)
            .optional()
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<Vec<WorkspaceMember>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws_id))
            .order(created_at.asc())
            .load::<WorkspaceMember>(conn)
    }

    pub fn delete_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        diesel::delete(workspace_members.filter(workspace_id.eq(ws_id))).execute(conn)
    }
}
