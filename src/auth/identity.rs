use std::collections::HashSet;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::permission::Permission;
use crate::{
    db::repositories::UserRepository,
    error::{AppError, Result},
    state::AppState,
};

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";

/// An authenticated, active user and the permissions granted to them
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub is_superuser: bool,
    pub permissions: HashSet<Permission>,
}

/// The caller of an operation
#[derive(Debug, Clone, Default)]
pub enum CurrentUser {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated(user) => Some(user.username.as_str()),
            Self::Anonymous => None,
        }
    }

    pub fn has_perm(&self, permission: &Permission) -> bool {
        match self {
            Self::Authenticated(user) => {
                user.is_superuser || user.permissions.contains(permission)
            }
            Self::Anonymous => false,
        }
    }

    /// Fail with `PermissionDenied` unless the caller is authenticated and
    /// holds `permission`
    pub fn require(&self, permission: &Permission) -> Result<()> {
        match self {
            Self::Anonymous => {
                tracing::warn!(%permission, "Anonymous caller rejected");
                Err(AppError::permission_denied("Authentication required"))
            }
            Self::Authenticated(user) if !self.has_perm(permission) => {
                tracing::warn!(user = %user.username, %permission, "Missing permission");
                Err(AppError::permission_denied(format!(
                    "Missing permission {}",
                    permission
                )))
            }
            Self::Authenticated(_) => Ok(()),
        }
    }

    /// Fail unless the caller is authenticated at all
    pub fn require_login(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::permission_denied("Authentication required"))
        }
    }
}

fn extract_token_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn extract_token_from_cookies(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(token) = extract_token_from_headers(parts).or_else(|| extract_token_from_cookies(parts))
        else {
            return Ok(CurrentUser::Anonymous);
        };

        UserRepository::new(state.db.clone())
            .find_identity_by_token(&token)
            .await
    }
}
