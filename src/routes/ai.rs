use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
    AppState, error::AppResult, middleware::auth::AuthUser,
    services::ai_service::AiService, validation::ValidatedJson,
};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromChatRequest {
    #[validate(length(min = 1, message = "channelId is required"))]
    pub channel_id: String,
}

#[derive(Deserialize, Validate)]
pub struct ImproveDocumentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromChatResponse {
    pub content: String,
    pub message_count: usize,
}

#[derive(Serialize)]
pub struct ImproveDocumentResponse {
    pub content: String,
}

pub async fn generate_from_chat(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<GenerateFromChatRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let generated =
        AiService::generate_from_chat(&mut conn, &state.ai, &payload.channel_id).await?;

    Ok(Json(GenerateFromChatResponse {
        content: generated.content,
        message_count: generated.message_count,
    }))
}

pub async fn improve_document(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<ImproveDocumentRequest>,
) -> AppResult<impl IntoResponse> {
    let content = AiService::improve_document(&state.ai, &payload.content).await?;
    Ok(Json(ImproveDocumentResponse { content }))
}
