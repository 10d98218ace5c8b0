use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::UpdateProfileRequest, repo};
use crate::{
    auth::{dto::PublicUser, repo_types::User, AuthUser},
    error::ApiError,
    state::AppState,
};

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(get_me).put(update_me).delete(delete_me))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.validate()?;

    let user = repo::update_profile(
        &state.db,
        user_id,
        payload.name.as_deref(),
        payload.email.as_deref(),
    )
    .await
    .map_err(|e| ApiError::conflict_on_unique(e, "email already registered"))?
    .ok_or(ApiError::NotFound)?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state))]
pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode, ApiError> {
    if !repo::delete_account(&state.db, user_id).await? {
        return Err(ApiError::NotFound);
    }
    info!(%user_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
