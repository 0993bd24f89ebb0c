use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::AppResult,
    middleware::auth::AuthUser,
    services::context::RequestContext,
    services::workspaces_service::WorkspacesService,
    validation::{ValidatedJson, workspace::normalize_search_query},
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    #[validate(length(min = 1, max = 100, message = "Workspace name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinWorkspaceRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateWorkspaceRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let ctx = RequestContext::with_profile(
        &user,
        payload.user_name.as_deref(),
        payload.user_email.as_deref(),
    );

    let workspace = WorkspacesService::create(
        &mut conn,
        &ctx,
        &payload.name,
        payload.description,
        payload.icon,
        &payload.password,
        state.config.bcrypt_cost,
    )?;

    Ok((StatusCode::CREATED, Json(workspace)))
}

/// Lists the caller's workspaces. Membership is keyed by the token
/// subject, not a client-supplied user id.
pub async fn get_workspaces(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let workspaces = WorkspacesService::list_for_user(&mut conn, &user.id)?;
    Ok(Json(workspaces))
}

pub async fn search_workspaces(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = normalize_search_query(params.query.as_deref().unwrap_or_default())?;

    let mut conn = state.db.get()?;
    let results = WorkspacesService::search(&mut conn, &query)?;
    Ok(Json(results))
}

pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let workspace = WorkspacesService::get(&mut conn, workspace_id)?;
    Ok(Json(workspace))
}

pub async fn join_workspace(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<JoinWorkspaceRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let ctx = RequestContext::with_profile(
        &user,
        payload.user_name.as_deref(),
        payload.user_email.as_deref(),
    );

    let member = WorkspacesService::join(&mut conn, &ctx, workspace_id, &payload.password)?;
    Ok(Json(member))
}

pub async fn get_workspace_members(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let members = WorkspacesService::members(&mut conn, workspace_id)?;
    Ok(Json(members))
}

pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let ctx = RequestContext::new(&user);
    WorkspacesService::delete(&mut conn, &ctx, workspace_id)?;
    Ok(StatusCode::NO_CONTENT)
}
