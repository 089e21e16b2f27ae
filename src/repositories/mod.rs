use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::comment::{Comment, NewComment};
use crate::models::interview::{Interview, InterviewStatus, NewInterview};
use crate::models::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemoryDatastore;
pub use postgres::PostgresDatastore;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary for the platform. Handlers only ever see this trait;
/// production wires in `PostgresDatastore`, tests run on `MemoryDatastore`.
///
/// List queries return rows in insertion order (`created_at` ascending);
/// clients render them without sorting.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Insert-if-absent keyed by `clerk_id`; an existing row is returned
    /// untouched. New rows get the `candidate` role.
    async fn sync_user(&self, user: NewUser) -> Result<User, DatastoreError>;

    async fn list_users(&self) -> Result<Vec<User>, DatastoreError>;

    async fn user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, DatastoreError>;

    async fn create_interview(&self, interview: NewInterview)
        -> Result<Interview, DatastoreError>;

    async fn list_interviews(&self) -> Result<Vec<Interview>, DatastoreError>;

    async fn interviews_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<Interview>, DatastoreError>;

    async fn interview_by_stream_call_id(
        &self,
        stream_call_id: &str,
    ) -> Result<Option<Interview>, DatastoreError>;

    /// Overwrites the stored status and stamps `end_time = now` exactly when
    /// the new status is `completed`; any other status leaves `end_time`
    /// alone. Fails with `NotFound` for an unknown id.
    async fn set_interview_status(
        &self,
        id: Uuid,
        status: InterviewStatus,
        now: DateTime<Utc>,
    ) -> Result<Interview, DatastoreError>;

    /// Fails with `NotFound` when the referenced interview does not exist.
    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DatastoreError>;

    async fn comments_for_interview(
        &self,
        interview_id: Uuid,
    ) -> Result<Vec<Comment>, DatastoreError>;
}
