use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::{
    middleware::auth::AuthUser,
    models::comment::{CommentResponse, CreateCommentRequest, NewComment},
    utils::errors::AppError,
    AppState,
};

/// The author is always the verified identity; the payload has no author
/// field to spoof.
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state
        .store
        .add_comment(NewComment {
            interview_id: id,
            content: payload.content,
            rating: payload.rating,
            interviewer_id: auth_user.subject,
        })
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = state.store.comments_for_interview(id).await?;

    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}
