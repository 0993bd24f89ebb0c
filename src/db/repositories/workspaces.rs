use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::workspace::{NewWorkspace, Workspace};

pub struct WorkspacesRepo;

impl WorkspacesRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_ws: &NewWorkspace,
    ) -> Result<Workspace, diesel::result::Error> {
        diesel::insert_into(crate::schema::workspaces::table)
            .values(new_ws)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .first::<Workspace>(conn)
            .optional()
    }

    /// Workspaces the given user belongs to, most recently updated first.
    pub fn list_for_user(
        conn: &mut PgConnection,
        member_user_id: &str,
    ) -> Result<Vec<Workspace>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl as m;
        use crate::schema::workspaces::dsl as w;
        w::workspaces
            .inner_join(m::workspace_members)
            .filter(m::user_id.eq(member_user_id))
            .select(Workspace::as_select())
            .order(w::updated_at.desc())
            .load(conn)
    }

    /// Case-insensitive substring match on name/description, plus an exact
    /// id match when the query parses as a UUID. Capped at 50 rows.
    pub fn search(
        conn: &mut PgConnection,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        let pattern = format!("%{}%", query);
        let mut q = workspaces.into_boxed().filter(
            name.ilike(pattern.clone())
                .or(description.ilike(pattern).assume_not_null()),
        );
        if let Ok(exact_id) = query.parse::<Uuid>() {
            q = q.or_filter(id.eq(exact_id));
        }
        q.order(name.asc()).limit(limit).load(conn)
    }

    pub fn touch(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::update(workspaces.filter(id.eq(workspace_id)))
            .set(updated_at.eq(diesel::dsl::now))
            .execute(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        diesel::delete(workspaces.filter(id.eq(workspace_id))).execute(conn)
    }
}
