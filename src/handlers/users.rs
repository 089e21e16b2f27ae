use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use validator::Validate;

use crate::{
    middleware::auth::AuthUser,
    models::user::{NewUser, SyncUserRequest, UserResponse},
    utils::errors::AppError,
    AppState,
};

/// Called by the frontend after every sign-in, before the identity token is
/// necessarily attached; syncing an already-known subject is a no-op.
pub async fn sync_user(
    State(state): State<AppState>,
    Json(payload): Json<SyncUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let user = state.store.sync_user(NewUser::from(payload)).await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn get_users(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user_by_clerk_id(
    State(state): State<AppState>,
    Path(clerk_id): Path<String>,
) -> Result<Json<Option<UserResponse>>, AppError> {
    let user = state.store.user_by_clerk_id(&clerk_id).await?;

    Ok(Json(user.map(UserResponse::from)))
}
