pub mod ai_service;
pub mod channels_service;
pub mod context;
pub mod documents_service;
pub mod messages_service;
pub mod workspaces_service;
