/// Session token issuance
///
/// Thin adapter over `crypto_core::jwt`: tokens are HS256-signed with the
/// requesting application's secret.
use crate::error::{AuthError, Result};
use crate::models::{App, User};
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token binding `user` to `app`, valid for `ttl`
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JwtTokenIssuer;

impl JwtTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::Internal(format!("Token TTL out of range: {}", e)))?;

        crypto_core::jwt::issue_token(user.id, &user.email, app.id, app.secret.as_bytes(), ttl)
            .map_err(|e| AuthError::Internal(format!("Failed to create token: {}", e)))
    }
}
