use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    middleware::auth::{AuthUser, MaybeAuthUser},
    models::interview::{
        CreateInterviewRequest, InterviewResponse, NewInterview, UpdateStatusRequest,
    },
    utils::{errors::AppError, logger::LOGGER},
    AppState,
};

pub async fn create_interview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateInterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    payload.validate()?;

    let interview = state
        .store
        .create_interview(NewInterview::from(payload))
        .await?;

    LOGGER.log_business_event(
        "interview_scheduled",
        Some(&auth_user.subject),
        HashMap::from([("interview_id".to_string(), serde_json::json!(interview.id))]),
    );

    Ok(Json(InterviewResponse::new(interview, Utc::now())))
}

pub async fn get_interviews(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> Result<Json<Vec<InterviewResponse>>, AppError> {
    let now = Utc::now();
    let interviews = state.store.list_interviews().await?;

    Ok(Json(
        interviews
            .into_iter()
            .map(|interview| InterviewResponse::new(interview, now))
            .collect(),
    ))
}

/// Anonymous callers get an empty list, not an error. The frontend polls
/// this before the identity handshake finishes.
pub async fn get_my_interviews(
    State(state): State<AppState>,
    Extension(MaybeAuthUser(auth_user)): Extension<MaybeAuthUser>,
) -> Result<Json<Vec<InterviewResponse>>, AppError> {
    let auth_user = match auth_user {
        Some(user) => user,
        None => return Ok(Json(Vec::new())),
    };

    let now = Utc::now();
    let interviews = state
        .store
        .interviews_for_candidate(&auth_user.subject)
        .await?;

    Ok(Json(
        interviews
            .into_iter()
            .map(|interview| InterviewResponse::new(interview, now))
            .collect(),
    ))
}

/// Public: the meeting page resolves its call id before the viewer is
/// necessarily signed in. A miss is `null`, not 404.
pub async fn get_interview_by_stream_call_id(
    State(state): State<AppState>,
    Path(stream_call_id): Path<String>,
) -> Result<Json<Option<InterviewResponse>>, AppError> {
    let interview = state
        .store
        .interview_by_stream_call_id(&stream_call_id)
        .await?;

    Ok(Json(
        interview.map(|interview| InterviewResponse::new(interview, Utc::now())),
    ))
}

/// Public: the meeting page fires this transition as the call ends, not
/// always with a session attached. A missing id surfaces as the storage
/// layer's not-found.
pub async fn update_interview_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let updated = state
        .store
        .set_interview_status(id, payload.status, Utc::now())
        .await?;

    LOGGER.log_business_event(
        "interview_status_updated",
        None,
        HashMap::from([
            ("interview_id".to_string(), serde_json::json!(updated.id)),
            ("status".to_string(), serde_json::json!(updated.status)),
        ]),
    );

    Ok(Json(InterviewResponse::new(updated, Utc::now())))
}
