use sqlx::{FromRow, PgPool};
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::meals::repo_types::Meal;
use crate::summary::MacroLine;

/// One entry joined with its meal, reduced to what aggregation needs.
#[derive(Debug, FromRow)]
pub struct EntryLineRow {
    pub meal_id: Uuid,
    pub date: OffsetDateTime,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub quantity: i32,
}

impl EntryLineRow {
    pub fn macro_line(&self) -> MacroLine {
        MacroLine {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            quantity: self.quantity,
        }
    }
}

/// UTC half-open interval covering one calendar day.
pub fn day_bounds(day: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = day.midnight().assume_utc();
    (start, start + Duration::days(1))
}

/// All of a user's meals newest first, optionally limited to one day.
pub async fn meals_for_user(
    db: &PgPool,
    user_id: Uuid,
    day: Option<Date>,
) -> sqlx::Result<Vec<Meal>> {
    match day {
        None => {
            sqlx::query_as::<_, Meal>(
                r#"
                SELECT id, user_id, date, created_at
                FROM meals
                WHERE user_id = $1
                ORDER BY date DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(db)
            .await
        }
        Some(day) => {
            let (start, end) = day_bounds(day);
            sqlx::query_as::<_, Meal>(
                r#"
                SELECT id, user_id, date, created_at
                FROM meals
                WHERE user_id = $1 AND date >= $2 AND date < $3
                ORDER BY date DESC
                "#,
            )
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(db)
            .await
        }
    }
}

/// Entry lines for all of a user's meals, optionally limited to one day.
/// Ownership scoping lives in the join condition.
pub async fn entry_lines(
    db: &PgPool,
    user_id: Uuid,
    day: Option<Date>,
) -> sqlx::Result<Vec<EntryLineRow>> {
    match day {
        None => {
            sqlx::query_as::<_, EntryLineRow>(
                r#"
                SELECT e.meal_id, m.date, e.calories, e.protein, e.carbs, e.fat, e.quantity
                FROM meal_entries e
                JOIN meals m ON m.id = e.meal_id
                WHERE m.user_id = $1
                "#,
            )
            .bind(user_id)
            .fetch_all(db)
            .await
        }
        Some(day) => {
            let (start, end) = day_bounds(day);
            sqlx::query_as::<_, EntryLineRow>(
                r#"
                SELECT e.meal_id, m.date, e.calories, e.protein, e.carbs, e.fat, e.quantity
                FROM meal_entries e
                JOIN meals m ON m.id = e.meal_id
                WHERE m.user_id = $1 AND m.date >= $2 AND m.date < $3
                "#,
            )
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(db)
            .await
        }
    }
}
