use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::{
    AppState, error::AppResult, middleware::auth::AuthUser,
    services::context::RequestContext, services::messages_service::MessagesService,
    validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "channelId is required"))]
    pub channel_id: String,
    #[validate(length(min = 1, message = "Message content is required"))]
    pub message: String,
    pub user_name: Option<String>,
}

pub async fn get_channel_messages(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(channel_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let messages = MessagesService::history(&mut conn, &channel_id)?;
    Ok(Json(messages))
}

/// HTTP fallback for clients without a live relay connection. The message
/// is persisted only; delivery happens when subscribers backfill history.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<SendMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let ctx = RequestContext::with_profile(&user, payload.user_name.as_deref(), None);
    let message = MessagesService::record(
        &mut conn,
        &payload.channel_id,
        &ctx.user_id,
        &ctx.user_name,
        &payload.message,
    )?;
    Ok((StatusCode::CREATED, Json(message)))
}
