use axum::{
    extract::{Extension, State},
    response::Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    middleware::auth::AuthUser,
    models::interview::{Interview, InterviewResponse},
    services::directory::{candidate_display, interviewer_display, DisplayInfo},
    services::lifecycle::group_interviews,
    utils::errors::AppError,
    AppState,
};

#[derive(Debug, Serialize)]
pub struct DashboardCard {
    pub interview: InterviewResponse,
    pub candidate: DisplayInfo,
    pub interviewers: Vec<DisplayInfo>,
}

/// Empty buckets are omitted entirely; the dashboard only renders sections
/// that have cards.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub succeeded: Vec<DashboardCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<DashboardCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<DashboardCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub upcoming: Vec<DashboardCard>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let now = Utc::now();
    let interviews = state.store.list_interviews().await?;
    let users = state.store.list_users().await?;

    let groups = group_interviews(interviews, now);

    let cards = |bucket: Vec<Interview>| {
        bucket
            .into_iter()
            .map(|interview| {
                let candidate = candidate_display(&users, &interview.candidate_id);
                let interviewers = interview
                    .interviewer_ids
                    .iter()
                    .map(|id| interviewer_display(&users, id))
                    .collect();
                DashboardCard {
                    interview: InterviewResponse::new(interview, now),
                    candidate,
                    interviewers,
                }
            })
            .collect::<Vec<_>>()
    };

    Ok(Json(DashboardResponse {
        succeeded: cards(groups.succeeded),
        failed: cards(groups.failed),
        completed: cards(groups.completed),
        upcoming: cards(groups.upcoming),
    }))
}
