use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::services::lifecycle::{resolve_phase, Phase};
use crate::utils::duration::format_duration;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: InterviewStatus,
    pub stream_call_id: String,
    pub candidate_id: String,
    pub interviewer_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored lifecycle states. `ongoing` is deliberately absent: it is derived
/// from the clock at read time (see `services::lifecycle`) and never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Upcoming,
    Completed,
    Succeeded,
    Failed,
}

/// Timestamps cross the wire as epoch milliseconds, matching what the
/// scheduling frontend sends from `Date.getTime()`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: InterviewStatus,
    pub stream_call_id: String,
    #[validate(length(min = 1, message = "A candidate must be selected"))]
    pub candidate_id: String,
    #[validate(length(min = 1, message = "At least one interviewer is required"))]
    pub interviewer_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: InterviewStatus,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: InterviewStatus,
    pub stream_call_id: String,
    pub candidate_id: String,
    pub interviewer_ids: Vec<String>,
}

impl From<CreateInterviewRequest> for NewInterview {
    fn from(request: CreateInterviewRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            start_time: request.start_time,
            end_time: request.end_time,
            status: request.status,
            stream_call_id: request.stream_call_id,
            candidate_id: request.candidate_id,
            interviewer_ids: request.interviewer_ids,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: InterviewStatus,
    pub phase: Phase,
    pub duration: Option<String>,
    pub stream_call_id: String,
    pub candidate_id: String,
    pub interviewer_ids: Vec<String>,
    #[serde(rename = "creationTime", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl InterviewResponse {
    /// `phase` and `duration` are derived per request; only the stored fields
    /// come from the row.
    pub fn new(interview: Interview, now: DateTime<Utc>) -> Self {
        let phase = resolve_phase(&interview, now);
        let duration = interview
            .end_time
            .map(|end| format_duration(interview.start_time, end));

        Self {
            id: interview.id,
            title: interview.title,
            description: interview.description,
            start_time: interview.start_time,
            end_time: interview.end_time,
            status: interview.status,
            phase,
            duration,
            stream_call_id: interview.stream_call_id,
            candidate_id: interview.candidate_id,
            interviewer_ids: interview.interviewer_ids,
            created_at: interview.created_at,
        }
    }
}
