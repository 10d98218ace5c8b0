use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Goal;

pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Goal>> {
    sqlx::query_as::<_, Goal>(
        r#"
        SELECT id, user_id, calories, protein, carbs, fat, created_at, updated_at
        FROM goals
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Atomic insert-or-update against the UNIQUE(user_id) constraint. Two
/// racing upserts for the same user both land on the single row; a
/// read-then-branch would not guarantee that.
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
) -> sqlx::Result<Goal> {
    sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (user_id, calories, protein, carbs, fat)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE
        SET calories = EXCLUDED.calories,
            protein = EXCLUDED.protein,
            carbs = EXCLUDED.carbs,
            fat = EXCLUDED.fat,
            updated_at = now()
        RETURNING id, user_id, calories, protein, carbs, fat, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .fetch_one(db)
    .await
}

/// Partial update; `None` when the user has no goal yet.
pub async fn update_partial(
    db: &PgPool,
    user_id: Uuid,
    calories: Option<i32>,
    protein: Option<i32>,
    carbs: Option<i32>,
    fat: Option<i32>,
) -> sqlx::Result<Option<Goal>> {
    sqlx::query_as::<_, Goal>(
        r#"
        UPDATE goals
        SET calories = COALESCE($2, calories),
            protein = COALESCE($3, protein),
            carbs = COALESCE($4, carbs),
            fat = COALESCE($5, fat),
            updated_at = now()
        WHERE user_id = $1
        RETURNING id, user_id, calories, protein, carbs, fat, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, user_id: Uuid) -> sqlx::Result<bool> {
    let deleted = sqlx::query("DELETE FROM goals WHERE user_id = $1")
        .bind(user_id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}
