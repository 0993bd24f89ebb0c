use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState, error::AppResult, middleware::auth::AuthUser,
    services::documents_service::DocumentsService, validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocumentRequest {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    // May legitimately be the empty string, so no length rule.
    #[serde(default)]
    pub content: String,
    #[serde(rename = "workspace")]
    pub workspace_id: Uuid,
    pub created_by: Option<String>,
}

pub async fn save_document(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<SaveDocumentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let created_by = payload.created_by.unwrap_or_else(|| user.id.clone());

    let document = DocumentsService::save(
        &mut conn,
        payload.id,
        payload.title.as_deref(),
        &payload.content,
        payload.workspace_id,
        Some(&created_by),
    )?;
    Ok(Json(document))
}

pub async fn get_document(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let document = DocumentsService::load(&mut conn, id)?;
    Ok(Json(document))
}

pub async fn get_workspace_documents(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let documents = DocumentsService::list_by_workspace(&mut conn, workspace_id)?;
    Ok(Json(documents))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    DocumentsService::delete(&mut conn, id)?;
    Ok(StatusCode::NO_CONTENT)
}
