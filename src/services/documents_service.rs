use diesel::prelude::PgConnection;
use uuid::Uuid;

use crate::{
    db::models::document::{Document, NewDocument},
    db::repositories::documents::DocumentsRepo,
    db::repositories::workspaces::WorkspacesRepo,
    error::AppError,
};

const DEFAULT_TITLE: &str = "Untitled";

pub struct DocumentsService;

impl DocumentsService {
    /// Upsert-style save: with an id the document is updated in place,
    /// without one a new row is created. Content may be the empty string.
    pub fn save(
        conn: &mut PgConnection,
        id: Option<Uuid>,
        title: Option<&str>,
        content: &str,
        workspace_id: Uuid,
        created_by: Option<&str>,
    ) -> Result<Document, AppError> {
        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => DEFAULT_TITLE,
        };

        match id {
            Some(doc_id) => DocumentsRepo::update(conn, doc_id, title, content)?
                .ok_or_else(|| AppError::not_found("Document")),
            None => {
                let doc = DocumentsRepo::insert(
                    conn,
                    &NewDocument {
                        workspace_id,
                        title: title.to_string(),
                        content: content.to_string(),
                        created_by: created_by.map(|s| s.to_string()),
                    },
                )?;
                Ok(doc)
            }
        }
    }

    pub fn load(conn: &mut PgConnection, id: Uuid) -> Result<Document, AppError> {
        DocumentsRepo::find_by_id(conn, id)?.ok_or_else(|| AppError::not_found("Document"))
    }

    pub fn list_by_workspace(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<Vec<Document>, AppError> {
        Ok(DocumentsRepo::list_by_workspace(conn, workspace_id)?)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        let deleted = DocumentsRepo::delete_by_id(conn, id)?;
        if deleted == 0 {
            return Err(AppError::not_found("Document"));
        }
        Ok(())
    }
}
