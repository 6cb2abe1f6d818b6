/// User database operations for sso-service
use super::{StoreError, StoreResult};
use crate::models::User;
use sqlx::PgPool;

/// Find user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a new user and return the generated id
///
/// Email uniqueness is enforced by the `users_email_key` unique index; a
/// violation is reported as `StoreError::UserExists`.
pub async fn create_user(pool: &PgPool, email: &str, password_hash: &str) -> StoreResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (email, password_hash)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => StoreError::UserExists,
        other => StoreError::Database(other),
    })?;

    Ok(id)
}

/// Admin flag for a user, `None` if the user does not exist
pub async fn is_admin(pool: &PgPool, user_id: i64) -> StoreResult<Option<bool>> {
    let is_admin = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(is_admin)
}
