use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::comment::{Comment, NewComment};
use crate::models::interview::{Interview, InterviewStatus, NewInterview};
use crate::models::user::{NewUser, User, UserRole};

use super::{Datastore, DatastoreError};

/// In-memory datastore with the same observable behavior as the Postgres
/// implementation. Vecs double as the insertion-order index.
#[derive(Default)]
pub struct MemoryDatastore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    interviews: Vec<Interview>,
    comments: Vec<Comment>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role promotion happens out of band in production; tests seed promoted
    /// rows directly.
    pub(crate) async fn seed_user(&self, user: User) {
        self.inner.write().await.users.push(user);
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn sync_user(&self, user: NewUser) -> Result<User, DatastoreError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.users.iter().find(|u| u.clerk_id == user.clerk_id) {
            return Ok(existing.clone());
        }

        let created = User {
            clerk_id: user.clerk_id,
            name: user.name,
            email: user.email,
            image: user.image,
            role: UserRole::Candidate,
            created_at: Utc::now(),
        };
        inner.users.push(created.clone());

        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatastoreError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, DatastoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.clerk_id == clerk_id).cloned())
    }

    async fn create_interview(
        &self,
        interview: NewInterview,
    ) -> Result<Interview, DatastoreError> {
        let mut inner = self.inner.write().await;

        let created = Interview {
            id: Uuid::new_v4(),
            title: interview.title,
            description: interview.description,
            start_time: interview.start_time,
            end_time: interview.end_time,
            status: interview.status,
            stream_call_id: interview.stream_call_id,
            candidate_id: interview.candidate_id,
            interviewer_ids: interview.interviewer_ids,
            created_at: Utc::now(),
        };
        inner.interviews.push(created.clone());

        Ok(created)
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>, DatastoreError> {
        Ok(self.inner.read().await.interviews.clone())
    }

    async fn interviews_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<Interview>, DatastoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .interviews
            .iter()
            .filter(|i| i.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    async fn interview_by_stream_call_id(
        &self,
        stream_call_id: &str,
    ) -> Result<Option<Interview>, DatastoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .interviews
            .iter()
            .find(|i| i.stream_call_id == stream_call_id)
            .cloned())
    }

    async fn set_interview_status(
        &self,
        id: Uuid,
        status: InterviewStatus,
        now: DateTime<Utc>,
    ) -> Result<Interview, DatastoreError> {
        let mut inner = self.inner.write().await;

        let interview = inner
            .interviews
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DatastoreError::NotFound)?;

        interview.status = status;
        if status == InterviewStatus::Completed {
            interview.end_time = Some(now);
        }

        Ok(interview.clone())
    }

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DatastoreError> {
        let mut inner = self.inner.write().await;

        if !inner.interviews.iter().any(|i| i.id == comment.interview_id) {
            return Err(DatastoreError::NotFound);
        }

        let created = Comment {
            id: Uuid::new_v4(),
            interview_id: comment.interview_id,
            content: comment.content,
            rating: comment.rating,
            interviewer_id: comment.interviewer_id,
            created_at: Utc::now(),
        };
        inner.comments.push(created.clone());

        Ok(created)
    }

    async fn comments_for_interview(
        &self,
        interview_id: Uuid,
    ) -> Result<Vec<Comment>, DatastoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .comments
            .iter()
            .filter(|c| c.interview_id == interview_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_user(clerk_id: &str, name: &str) -> NewUser {
        NewUser {
            clerk_id: clerk_id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", clerk_id),
            image: None,
        }
    }

    fn new_interview(call_id: &str, start: DateTime<Utc>) -> NewInterview {
        NewInterview {
            title: "Pairing session".to_string(),
            description: None,
            start_time: start,
            end_time: None,
            status: InterviewStatus::Upcoming,
            stream_call_id: call_id.to_string(),
            candidate_id: "user_cand".to_string(),
            interviewer_ids: vec!["user_int".to_string()],
        }
    }

    #[tokio::test]
    async fn sync_is_idempotent_and_never_overwrites() {
        let store = MemoryDatastore::new();

        store.sync_user(new_user("user_1", "Ada")).await.unwrap();
        let second = store
            .sync_user(new_user("user_1", "Renamed"))
            .await
            .unwrap();

        assert_eq!(second.name, "Ada");
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn synced_users_default_to_candidate() {
        let store = MemoryDatastore::new();
        let user = store.sync_user(new_user("user_1", "Ada")).await.unwrap();
        assert_eq!(user.role, UserRole::Candidate);
    }

    #[tokio::test]
    async fn completing_stamps_end_time_and_the_stamp_survives_a_verdict() {
        let store = MemoryDatastore::new();
        let start = Utc::now() - Duration::hours(2);
        let interview = store.create_interview(new_interview("call-1", start)).await.unwrap();

        let now = Utc::now();
        let completed = store
            .set_interview_status(interview.id, InterviewStatus::Completed, now)
            .await
            .unwrap();
        assert_eq!(completed.end_time, Some(now));

        let succeeded = store
            .set_interview_status(interview.id, InterviewStatus::Succeeded, now + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(succeeded.status, InterviewStatus::Succeeded);
        assert_eq!(succeeded.end_time, Some(now));
    }

    #[tokio::test]
    async fn updating_an_unknown_id_is_not_found() {
        let store = MemoryDatastore::new();
        let result = store
            .set_interview_status(Uuid::new_v4(), InterviewStatus::Completed, Utc::now())
            .await;

        assert!(matches!(result, Err(DatastoreError::NotFound)));
    }

    #[tokio::test]
    async fn comments_require_an_existing_interview() {
        let store = MemoryDatastore::new();
        let result = store
            .add_comment(NewComment {
                interview_id: Uuid::new_v4(),
                content: "Strong on fundamentals".to_string(),
                rating: 4,
                interviewer_id: "user_int".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DatastoreError::NotFound)));
    }

    #[tokio::test]
    async fn lists_keep_insertion_order() {
        let store = MemoryDatastore::new();
        let start = Utc::now() + Duration::hours(1);

        let first = store.create_interview(new_interview("call-1", start)).await.unwrap();
        let second = store.create_interview(new_interview("call-2", start)).await.unwrap();

        let listed = store.list_interviews().await.unwrap();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn stream_call_lookup_returns_the_first_match() {
        let store = MemoryDatastore::new();
        let start = Utc::now() + Duration::hours(1);

        let first = store.create_interview(new_interview("call-dup", start)).await.unwrap();
        store.create_interview(new_interview("call-dup", start)).await.unwrap();

        let found = store
            .interview_by_stream_call_id("call-dup")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
    }
}
