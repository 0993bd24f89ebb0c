use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::models::user::{NewUser, User};

pub struct UsersRepo;

impl UsersRepo {
    /// Insert-or-refresh keyed on the identity provider's id. Creates the
    /// row on a user's first authenticated request.
    pub fn upsert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users;
        diesel::insert_into(users::table)
            .values(new_user)
            .on_conflict(users::external_id)
            .do_update()
            .set((
                users::name.eq(excluded(users::name)),
                users::email.eq(excluded(users::email)),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .get_result(conn)
    }

    pub fn find_by_external_id(
        conn: &mut PgConnection,
        ext_id: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(external_id.eq(ext_id))
            .first::<User>(conn)
            .optional()
    }
}
