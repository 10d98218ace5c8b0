use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreateEntryRequest, CreateMealRequest, EntryResponse, MealResponse, MealSummaryResponse,
    MealWithEntries, Pagination, UpdateEntryRequest, UpdateMealRequest,
};
use super::repo;
use crate::{auth::AuthUser, error::ApiError, scope, state::AppState, summary};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
        .route("/meals/:id/entries", get(list_entries))
        .route("/meals/:id/summary", get(meal_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", axum::routing::post(create_meal))
        .route(
            "/meals/:id",
            axum::routing::put(update_meal).delete(delete_meal),
        )
        .route("/meals/:id/entries", axum::routing::post(create_entry))
        .route(
            "/meals/:id/entries/:entry_id",
            axum::routing::put(update_entry).delete(delete_entry),
        )
}

/// Fetches the meal by id alone and runs it through the scope component, so
/// a foreign meal id and a nonexistent one are indistinguishable.
async fn owned_meal(
    state: &AppState,
    meal_id: Uuid,
    caller: Uuid,
) -> Result<super::repo_types::Meal, ApiError> {
    let meal = repo::find(&state.db, meal_id).await?;
    scope::ensure_owned(meal, |m| m.user_id, caller)
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), ApiError> {
    let date = payload.validate()?;
    let meal = repo::create(&state.db, user_id, date).await?;
    info!(meal_id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, Json(MealResponse::from(meal))))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealResponse>>, ApiError> {
    let meals = repo::list_by_user(&state.db, user_id, p.limit, p.offset).await?;
    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealWithEntries>, ApiError> {
    let meal = owned_meal(&state, id, user_id).await?;
    let entries = repo::list_entries(&state.db, meal.id).await?;
    Ok(Json(MealWithEntries {
        id: meal.id,
        date: meal.date,
        entries: entries.into_iter().map(EntryResponse::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> Result<Json<MealResponse>, ApiError> {
    let date = payload.validate()?;
    owned_meal(&state, id, user_id).await?;
    let meal = repo::update_date(&state.db, id, date)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(MealResponse::from(meal)))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    owned_meal(&state, id, user_id).await?;
    repo::delete_with_entries(&state.db, id).await?;
    info!(meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let meal = owned_meal(&state, id, user_id).await?;
    let entries = repo::list_entries(&state.db, meal.id).await?;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), ApiError> {
    payload.validate()?;
    let meal = owned_meal(&state, id, user_id).await?;
    let entry = repo::create_entry(
        &state.db,
        meal.id,
        &payload.food_name,
        payload.calories,
        payload.protein,
        payload.carbs,
        payload.fat,
        payload.quantity,
    )
    .await?;
    info!(entry_id = %entry.id, meal_id = %meal.id, "entry created");
    Ok((StatusCode::CREATED, Json(EntryResponse::from(entry))))
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, entry_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    payload.validate()?;
    let meal = owned_meal(&state, id, user_id).await?;
    let entry = repo::update_entry(
        &state.db,
        meal.id,
        entry_id,
        payload.food_name.as_deref(),
        payload.calories,
        payload.protein,
        payload.carbs,
        payload.fat,
        payload.quantity,
    )
    .await?
    .ok_or(ApiError::NotFound)?;
    Ok(Json(EntryResponse::from(entry)))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let meal = owned_meal(&state, id, user_id).await?;
    if !repo::delete_entry(&state.db, meal.id, entry_id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn meal_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealSummaryResponse>, ApiError> {
    let meal = owned_meal(&state, id, user_id).await?;
    let entries = repo::list_entries(&state.db, meal.id).await?;
    let totals = summary::aggregate(entries.iter().map(|e| e.macro_line()));
    Ok(Json(MealSummaryResponse {
        meal_id: meal.id,
        date: meal.date,
        totals,
    }))
}
