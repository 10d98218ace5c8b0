use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use time::Date;
use tracing::instrument;
use uuid::Uuid;

use super::dto::{parse_day, DaySummary};
use super::repo;
use crate::{
    auth::AuthUser,
    error::ApiError,
    meals::dto::MealSummaryResponse,
    state::AppState,
    summary::{self, MacroTotals},
};

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/daily-summary", get(daily_summary))
        .route("/summaries", get(list_summaries))
        .route("/summaries/:date", get(day_summaries))
}

/// Per-day totals across all of the caller's meals, newest day first. Days
/// with no meals are absent rather than emitted as zero rows.
#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<DaySummary>>, ApiError> {
    let meals = repo::meals_for_user(&state.db, user_id, None).await?;
    let lines = repo::entry_lines(&state.db, user_id, None).await?;

    let days = summary::totals_by_key(
        meals.iter().map(|m| m.date.date()),
        lines.iter().map(|l| (l.date.date(), l.macro_line())),
    );

    Ok(Json(
        days.into_iter()
            .rev()
            .map(|(date, totals)| DaySummary::new(date, totals))
            .collect(),
    ))
}

#[instrument(skip(state))]
pub async fn list_summaries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MealSummaryResponse>>, ApiError> {
    per_meal_summaries(&state, user_id, None).await.map(Json)
}

#[instrument(skip(state))]
pub async fn day_summaries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<MealSummaryResponse>>, ApiError> {
    let day = parse_day(&date)?;
    per_meal_summaries(&state, user_id, Some(day)).await.map(Json)
}

/// One summary row per meal, in the meals' newest-first order. A meal with
/// no entries yields zero totals.
async fn per_meal_summaries(
    state: &AppState,
    user_id: Uuid,
    day: Option<Date>,
) -> Result<Vec<MealSummaryResponse>, ApiError> {
    let meals = repo::meals_for_user(&state.db, user_id, day).await?;
    let lines = repo::entry_lines(&state.db, user_id, day).await?;

    let mut totals = summary::totals_by_key(
        meals.iter().map(|m| m.id),
        lines.iter().map(|l| (l.meal_id, l.macro_line())),
    );

    Ok(meals
        .into_iter()
        .map(|m| MealSummaryResponse {
            meal_id: m.id,
            date: m.date,
            totals: totals.remove(&m.id).unwrap_or(MacroTotals::ZERO),
        })
        .collect())
}
