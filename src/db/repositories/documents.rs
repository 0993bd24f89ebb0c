use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::document::{Document, NewDocument};

pub struct DocumentsRepo;

impl DocumentsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_doc: &NewDocument,
    ) -> Result<Document, diesel::result::Error> {
        diesel::insert_into(crate::schema::documents::table)
            .values(new_doc)
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        doc_id: Uuid,
        new_title: &str,
        new_content: &str,
    ) -> Result<Option<Document>, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        diesel::update(documents.filter(id.eq(doc_id)))
            .set((
                title.eq(new_title),
                content.eq(new_content),
                updated_at.eq(diesel::dsl::now),
            ))
            .get_result(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        doc_id: Uuid,
    ) -> Result<Option<Document>, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        documents
            .filter(id.eq(doc_id))
            .first::<Document>(conn)
            .optional()
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<Vec<Document>, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        documents
            .filter(workspace_id.eq(ws_id))
            .order(updated_at.desc())
            .load::<Document>(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        doc_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        diesel::delete(documents.filter(id.eq(doc_id))).execute(conn)
    }

    pub fn delete_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::documents::dsl::*;
        diesel::delete(documents.filter(workspace_id.eq(ws_id))).execute(conn)
    }
}
