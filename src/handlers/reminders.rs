use axum::{
    extract::{Extension, Query, State},
    response::Json,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use validator::Validate;

use crate::{
    middleware::auth::AuthUser,
    models::user::UserRole,
    services::reminder::ReminderService,
    utils::errors::AppError,
    utils::logger::LOGGER,
    AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ReminderQuery {
    #[validate(range(min = 1, max = 8760, message = "Window must be between 1 and 8760 hours"))]
    pub hours: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    pub message: String,
    pub reminded: usize,
}

pub async fn trigger_reminders(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ReminderQuery>,
) -> Result<Json<ReminderResponse>, AppError> {
    query.validate()?;

    // Only interviewers may fire the reminder pass by hand.
    let caller = state
        .store
        .user_by_clerk_id(&auth_user.subject)
        .await?
        .ok_or_else(|| AppError::Forbidden("Interviewer role required".to_string()))?;

    if caller.role != UserRole::Interviewer {
        return Err(AppError::Forbidden("Interviewer role required".to_string()));
    }

    let hours = query.hours.unwrap_or(24);
    let service = ReminderService::new(state.store.clone());
    let reminded = service
        .process_due_reminders_within(Duration::hours(hours))
        .await
        .map_err(|e| {
            LOGGER.log_error(
                &format!("Reminder pass failed: {}", e),
                HashMap::from([
                    ("triggered_by".to_string(), json!(auth_user.subject)),
                    ("window_hours".to_string(), json!(hours)),
                ]),
            );
            AppError::InternalServerError("Reminder pass failed".to_string())
        })?;

    Ok(Json(ReminderResponse {
        message: format!("Reminders processed for interviews within {} hours", hours),
        reminded,
    }))
}
