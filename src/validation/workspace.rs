use crate::error::{AppError, AppResult};

/// Search queries are trimmed and must be at least two characters, unless
/// the caller pasted a workspace id verbatim.
pub fn normalize_search_query(query: &str) -> AppResult<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Search query is required"));
    }
    if trimmed.chars().count() < 2 {
        return Err(AppError::validation(
            "Search query must be at least 2 characters",
        ));
    }
    Ok(trimmed.to_string())
}
