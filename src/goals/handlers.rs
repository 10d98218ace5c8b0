use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{GoalRequest, GoalResponse, UpdateGoalRequest};
use super::repo;
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn goal_routes() -> Router<AppState> {
    Router::new().route(
        "/goals",
        get(get_goal)
            .post(upsert_goal)
            .put(update_goal)
            .delete(delete_goal),
    )
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = repo::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(GoalResponse::from(goal)))
}

#[instrument(skip(state, payload))]
pub async fn upsert_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    payload.validate()?;
    let goal = repo::upsert(
        &state.db,
        user_id,
        payload.calories,
        payload.protein,
        payload.carbs,
        payload.fat,
    )
    .await?;
    info!(goal_id = %goal.id, "goal upserted");
    Ok(Json(GoalResponse::from(goal)))
}

#[instrument(skip(state, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    payload.validate()?;
    let goal = repo::update_partial(
        &state.db,
        user_id,
        payload.calories,
        payload.protein,
        payload.carbs,
        payload.fat,
    )
    .await?
    .ok_or(ApiError::NotFound)?;
    Ok(Json(GoalResponse::from(goal)))
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, user_id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
