use crate::AppState;
use crate::db::models::user::NewUser;
use crate::db::repositories::users::UsersRepo;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims issued by the identity provider. `sub` is the provider's user
/// id, an opaque string kept as-is throughout the system.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: u64,
    pub iat: u64,
}

pub struct AuthService {
    secret: String,
}

impl AuthService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn issue_token(
        &self,
        user_id: &str,
        name: &str,
        email: Option<&str>,
        ttl_secs: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            name: Some(name.to_string()),
            email: email.map(|e| e.to_string()),
            exp: now + ttl_secs,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
    }
}

/// The authenticated caller, injected into request extensions by
/// `auth_middleware`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl AuthUser {
    fn from_claims(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name.unwrap_or_else(|| "User".to_string()),
            email: claims.email,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let auth_service = AuthService::new(state.config.jwt_secret.clone());
    let claims = auth_service
        .verify_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = AuthUser::from_claims(claims);
    record_user(&state, &user);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Keeps the `users` table in sync with the identity provider: the row is
/// created on a user's first authenticated request. Identity comes from
/// the verified token, so a storage hiccup here must not fail the request.
fn record_user(state: &AppState, user: &AuthUser) {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!("Skipping user sync, no database connection: {}", e);
            return;
        }
    };

    let new_user = NewUser {
        external_id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
    };

    if let Err(e) = UsersRepo::upsert(&mut conn, &new_user) {
        tracing::warn!("Failed to sync user {}: {}", user.id, e);
    }
}
