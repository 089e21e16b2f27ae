use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub content: String,
    pub rating: i32,
    pub interviewer_id: String,
    pub created_at: DateTime<Utc>,
}

/// No author field: the author is always the authenticated caller. The
/// rating is nominally 1-5; nothing enforces the range.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub rating: i32,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub interview_id: Uuid,
    pub content: String,
    pub rating: i32,
    pub interviewer_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub content: String,
    pub rating: i32,
    pub interviewer_id: String,
    #[serde(rename = "creationTime", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            interview_id: comment.interview_id,
            content: comment.content,
            rating: comment.rating,
            interviewer_id: comment.interviewer_id,
            created_at: comment.created_at,
        }
    }
}
