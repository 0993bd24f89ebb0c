use crate::middleware::auth::AuthUser;

/// Identity of the caller as established by the auth middleware. The id is
/// always the verified token subject; display name and email may be
/// overridden by the request payload (clients send fresher profile data
/// than the token carries).
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: String,
    pub user_name: String,
    pub user_email: Option<String>,
}

impl RequestContext {
    pub fn new(user: &AuthUser) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        }
    }

    pub fn with_profile(
        user: &AuthUser,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(&user.name)
                .to_string(),
            user_email: email.map(|e| e.to_string()).or_else(|| user.email.clone()),
        }
    }
}
