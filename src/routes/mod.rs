pub mod ai;
pub mod channels;
pub mod documents;
pub mod messages;
pub mod workspaces;

use crate::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/workspaces", post(workspaces::create_workspace))
        .route("/workspaces", get(workspaces::get_workspaces))
        .route("/workspaces/search", get(workspaces::search_workspaces))
        .route("/workspaces/:workspace_id", get(workspaces::get_workspace))
        .route(
            "/workspaces/:workspace_id",
            delete(workspaces::delete_workspace),
        )
        .route(
            "/workspaces/:workspace_id/join",
            post(workspaces::join_workspace),
        )
        .route(
            "/workspaces/:workspace_id/members",
            get(workspaces::get_workspace_members),
        )
        .route(
            "/channels/workspace/:workspace_id",
            get(channels::get_channels),
        )
        .route("/channels", post(channels::create_channel))
        .route("/channels/dm", post(channels::get_or_create_dm))
        .route(
            "/messages/channel/:channel_id",
            get(messages::get_channel_messages),
        )
        .route("/messages", post(messages::send_message))
        .route("/documents/save", post(documents::save_document))
        .route("/documents/:id", get(documents::get_document))
        .route("/documents/:id", delete(documents::delete_document))
        .route(
            "/documents/workspace/:workspace_id",
            get(documents::get_workspace_documents),
        )
        .route("/ai/generate-from-chat", post(ai::generate_from_chat))
        .route("/ai/improve-document", post(ai::improve_document))
        .with_state(state)
}
