use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde::Serialize;

use crate::{
    middleware::auth::AuthUser,
    utils::{errors::AppError, stream::mint_user_token},
    AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamTokenResponse {
    pub token: String,
    pub api_key: String,
    pub user_id: String,
}

/// Server-side half of joining a call: the browser SDK needs a user token
/// signed with the API secret it never sees.
pub async fn get_stream_token(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<StreamTokenResponse>, AppError> {
    let token = mint_user_token(&auth_user.subject, &state.stream_api_secret)
        .map_err(|_| AppError::InternalServerError("Failed to mint a call token".to_string()))?;

    Ok(Json(StreamTokenResponse {
        token,
        api_key: state.stream_api_key.clone(),
        user_id: auth_user.subject,
    }))
}
