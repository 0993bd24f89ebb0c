use crate::error::{AppError, AppResult};

pub fn validate_channel_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Channel name is required"));
    }
    if name.len() > 255 {
        return Err(AppError::validation(
            "Channel name must be at most 255 characters",
        ));
    }
    Ok(())
}

pub fn validate_dm_pair(user_a: &str, user_b: &str) -> AppResult<()> {
    if user_a.trim().is_empty() || user_b.trim().is_empty() {
        return Err(AppError::validation("Both participant ids are required"));
    }
    if user_a == user_b {
        return Err(AppError::validation(
            "A direct message requires two distinct participants",
        ));
    }
    Ok(())
}
