use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Directory row for a person known to the platform. `clerk_id` is the
/// identity provider's subject and the primary key; rows are written once by
/// the sync endpoint and never updated through the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub clerk_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidate,
    Interviewer,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequest {
    #[validate(length(min = 1))]
    pub clerk_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub clerk_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
}

impl From<SyncUserRequest> for NewUser {
    fn from(request: SyncUserRequest) -> Self {
        Self {
            clerk_id: request.clerk_id,
            name: request.name,
            email: request.email,
            image: request.image,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub clerk_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            clerk_id: user.clerk_id,
            name: user.name,
            email: user.email,
            image: user.image,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
