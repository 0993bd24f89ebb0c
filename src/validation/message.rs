use crate::error::{AppError, AppResult};

pub fn validate_send(channel_id: &str, content: &str) -> AppResult<()> {
    if channel_id.trim().is_empty() {
        return Err(AppError::validation("Channel ID is required"));
    }
    if content.is_empty() {
        return Err(AppError::validation("Message content is required"));
    }
    Ok(())
}
