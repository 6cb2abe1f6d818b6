use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;

/// Client application that session tokens are scoped to
///
/// `secret` is the HS256 key material for tokens issued to this application.
#[derive(Clone, FromRow)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}
