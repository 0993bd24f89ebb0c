use crate::error::{AppError, AppResult};

/// The improvement pass needs something to work with; whitespace-only
/// content is treated as empty.
pub fn validate_improve_content(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::validation("Document content is required"));
    }
    Ok(())
}
