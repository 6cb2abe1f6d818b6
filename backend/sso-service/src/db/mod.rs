/// Credential store for the SSO service
///
/// The authentication service talks to storage only through the traits in
/// this module:
/// - `UserSaver`: persist newly registered users
/// - `UserProvider`: look up users by email and read their admin flag
/// - `AppProvider`: look up client applications
///
/// Two adapters implement all three: `PgCredentialStore` (PostgreSQL via
/// sqlx) and `memory::InMemoryCredentialStore`.
use crate::models::{App, User};
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

pub mod apps;
pub mod memory;
pub mod users;

pub use memory::InMemoryCredentialStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Persist a new user and return its generated id.
    ///
    /// Returns `StoreError::UserExists` if the email is already registered.
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Find a user by email.
    async fn user(&self, email: &str) -> StoreResult<User>;

    /// Administrative flag of a user. The rule is owned by the store.
    async fn is_admin(&self, user_id: i64) -> StoreResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppProvider: Send + Sync {
    async fn app(&self, app_id: i32) -> StoreResult<App>;
}

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSaver for PgCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> StoreResult<i64> {
        users::create_user(&self.pool, email, password_hash).await
    }
}

#[async_trait]
impl UserProvider for PgCredentialStore {
    async fn user(&self, email: &str) -> StoreResult<User> {
        users::find_by_email(&self.pool, email)
            .await?
            .ok_or(StoreError::UserNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> StoreResult<bool> {
        users::is_admin(&self.pool, user_id)
            .await?
            .ok_or(StoreError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for PgCredentialStore {
    async fn app(&self, app_id: i32) -> StoreResult<App> {
        apps::find_by_id(&self.pool, app_id)
            .await?
            .ok_or(StoreError::AppNotFound)
    }
}
