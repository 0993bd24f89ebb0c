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
    AppState, db::enums::ChannelType, error::AppResult, middleware::auth::AuthUser,
    services::channels_service::ChannelsService, validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub workspace_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Channel name is required"))]
    pub name: String,
    #[serde(rename = "type", default)]
    pub channel_type: Option<ChannelType>,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessageRequest {
    pub workspace_id: Uuid,
    #[validate(length(min = 1, message = "userId1 is required"))]
    pub user_id1: String,
    #[validate(length(min = 1, message = "userId2 is required"))]
    pub user_id2: String,
    #[validate(length(min = 1, message = "userName1 is required"))]
    pub user_name1: String,
    #[validate(length(min = 1, message = "userName2 is required"))]
    pub user_name2: String,
}

pub async fn get_channels(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let channels = ChannelsService::list_by_workspace(&mut conn, workspace_id)?;
    Ok(Json(channels))
}

pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateChannelRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let channel = ChannelsService::create(
        &mut conn,
        payload.workspace_id,
        &payload.name,
        payload.channel_type.unwrap_or(ChannelType::Channel),
        payload.participants,
    )?;
    Ok((StatusCode::CREATED, Json(channel)))
}

/// Lookup-or-create for the DM channel of a participant pair. Both
/// participants calling at once get the same channel back.
pub async fn get_or_create_dm(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<DirectMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let channel = ChannelsService::get_or_create_dm(
        &mut conn,
        payload.workspace_id,
        &payload.user_id1,
        &payload.user_id2,
        &payload.user_name1,
        &payload.user_name2,
    )?;
    Ok(Json(channel))
}
