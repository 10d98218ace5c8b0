use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Meal, MealEntry};

pub async fn create(db: &PgPool, user_id: Uuid, date: OffsetDateTime) -> sqlx::Result<Meal> {
    sqlx::query_as::<_, Meal>(
        r#"
        INSERT INTO meals (user_id, date)
        VALUES ($1, $2)
        RETURNING id, user_id, date, created_at
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(db)
    .await
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Meal>> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, date, created_at
        FROM meals
        WHERE user_id = $1
        ORDER BY date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

/// Fetch by id alone; the caller decides ownership via the scope component.
pub async fn find(db: &PgPool, meal_id: Uuid) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, user_id, date, created_at
        FROM meals
        WHERE id = $1
        "#,
    )
    .bind(meal_id)
    .fetch_optional(db)
    .await
}

pub async fn update_date(
    db: &PgPool,
    meal_id: Uuid,
    date: OffsetDateTime,
) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(
        r#"
        UPDATE meals
        SET date = $2
        WHERE id = $1
        RETURNING id, user_id, date, created_at
        "#,
    )
    .bind(meal_id)
    .bind(date)
    .fetch_optional(db)
    .await
}

/// Removes the meal and its entries in one transaction, so no reader ever
/// observes entries referencing a missing meal.
pub async fn delete_with_entries(db: &PgPool, meal_id: Uuid) -> sqlx::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM meal_entries WHERE meal_id = $1")
        .bind(meal_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM meals WHERE id = $1")
        .bind(meal_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

// --- entries (always queried under an already-authorized meal id) ---

pub async fn list_entries(db: &PgPool, meal_id: Uuid) -> sqlx::Result<Vec<MealEntry>> {
    sqlx::query_as::<_, MealEntry>(
        r#"
        SELECT id, meal_id, food_name, calories, protein, carbs, fat, quantity, created_at
        FROM meal_entries
        WHERE meal_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(meal_id)
    .fetch_all(db)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create_entry(
    db: &PgPool,
    meal_id: Uuid,
    food_name: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    quantity: i32,
) -> sqlx::Result<MealEntry> {
    sqlx::query_as::<_, MealEntry>(
        r#"
        INSERT INTO meal_entries (meal_id, food_name, calories, protein, carbs, fat, quantity)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, meal_id, food_name, calories, protein, carbs, fat, quantity, created_at
        "#,
    )
    .bind(meal_id)
    .bind(food_name)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .bind(quantity)
    .fetch_one(db)
    .await
}

/// Partial update; absent fields keep their current value. The `meal_id`
/// bound keeps an entry id from another user's meal out of reach.
#[allow(clippy::too_many_arguments)]
pub async fn update_entry(
    db: &PgPool,
    meal_id: Uuid,
    entry_id: Uuid,
    food_name: Option<&str>,
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    quantity: Option<i32>,
) -> sqlx::Result<Option<MealEntry>> {
    sqlx::query_as::<_, MealEntry>(
        r#"
        UPDATE meal_entries
        SET food_name = COALESCE($3, food_name),
            calories = COALESCE($4, calories),
            protein = COALESCE($5, protein),
            carbs = COALESCE($6, carbs),
            fat = COALESCE($7, fat),
            quantity = COALESCE($8, quantity)
        WHERE id = $2 AND meal_id = $1
        RETURNING id, meal_id, food_name, calories, protein, carbs, fat, quantity, created_at
        "#,
    )
    .bind(meal_id)
    .bind(entry_id)
    .bind(food_name)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .bind(quantity)
    .fetch_optional(db)
    .await
}

pub async fn delete_entry(db: &PgPool, meal_id: Uuid, entry_id: Uuid) -> sqlx::Result<bool> {
    let deleted = sqlx::query("DELETE FROM meal_entries WHERE id = $2 AND meal_id = $1")
        .bind(meal_id)
        .bind(entry_id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}
