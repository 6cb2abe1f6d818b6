/// Application database operations for sso-service
use super::StoreResult;
use crate::models::App;
use sqlx::PgPool;

/// Find application by ID
pub async fn find_by_id(pool: &PgPool, app_id: i32) -> StoreResult<Option<App>> {
    let app = sqlx::query_as::<_, App>(
        "SELECT id, name, secret, created_at FROM apps WHERE id = $1",
    )
    .bind(app_id)
    .fetch_optional(pool)
    .await?;

    Ok(app)
}

/// Register a client application and return its id
pub async fn create_app(pool: &PgPool, name: &str, secret: &str) -> StoreResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO apps (name, secret)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET secret = EXCLUDED.secret
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(secret)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
