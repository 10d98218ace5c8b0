use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Partial profile update; absent fields keep their current value.
pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            email = COALESCE($3, email)
        WHERE id = $1
        RETURNING id, email, name, password_hash, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(email)
    .fetch_optional(db)
    .await
}

/// Deletes the account and everything reachable from it in one transaction:
/// entries, meals, goal, then the user row.
pub async fn delete_account(db: &PgPool, user_id: Uuid) -> sqlx::Result<bool> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM meal_entries
        WHERE meal_id IN (SELECT id FROM meals WHERE user_id = $1)
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM meals WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM goals WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}
