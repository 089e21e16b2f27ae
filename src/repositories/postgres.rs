use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::comment::{Comment, NewComment};
use crate::models::interview::{Interview, InterviewStatus, NewInterview};
use crate::models::user::{NewUser, User};
use crate::utils::logger::LOGGER;

use super::{Datastore, DatastoreError};

pub struct PostgresDatastore {
    pub pool: PgPool,
}

impl PostgresDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Datastore for PostgresDatastore {
    async fn sync_user(&self, user: NewUser) -> Result<User, DatastoreError> {
        // Role is left to the column default (`candidate`); promotions happen
        // out of band.
        sqlx::query(
            r#"
            INSERT INTO users (clerk_id, name, email, image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (clerk_id) DO NOTHING
            "#,
        )
        .bind(&user.clerk_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE clerk_id = $1")
            .bind(&user.clerk_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatastoreError> {
        let started = Instant::now();

        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        LOGGER.log_database_query(
            "SELECT * FROM users ORDER BY created_at ASC",
            started.elapsed().as_millis(),
            Some(users.len()),
        );

        Ok(users)
    }

    async fn user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, DatastoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE clerk_id = $1")
            .bind(clerk_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_interview(
        &self,
        interview: NewInterview,
    ) -> Result<Interview, DatastoreError> {
        let created = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews
                (id, title, description, start_time, end_time, status,
                 stream_call_id, candidate_id, interviewer_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&interview.title)
        .bind(&interview.description)
        .bind(interview.start_time)
        .bind(interview.end_time)
        .bind(interview.status)
        .bind(&interview.stream_call_id)
        .bind(&interview.candidate_id)
        .bind(&interview.interviewer_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>, DatastoreError> {
        let started = Instant::now();

        let interviews =
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        LOGGER.log_database_query(
            "SELECT * FROM interviews ORDER BY created_at ASC",
            started.elapsed().as_millis(),
            Some(interviews.len()),
        );

        Ok(interviews)
    }

    async fn interviews_for_candidate(
        &self,
        candidate_id: &str,
    ) -> Result<Vec<Interview>, DatastoreError> {
        let interviews = sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE candidate_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(interviews)
    }

    async fn interview_by_stream_call_id(
        &self,
        stream_call_id: &str,
    ) -> Result<Option<Interview>, DatastoreError> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE stream_call_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(stream_call_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(interview)
    }

    async fn set_interview_status(
        &self,
        id: Uuid,
        status: InterviewStatus,
        now: DateTime<Utc>,
    ) -> Result<Interview, DatastoreError> {
        let updated = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews
            SET status = $2,
                end_time = CASE WHEN $2 = 'completed'::interview_status
                                THEN $3 ELSE end_time END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatastoreError::NotFound)?;

        Ok(updated)
    }

    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DatastoreError> {
        let result = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, interview_id, content, rating, interviewer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(comment.interview_id)
        .bind(&comment.content)
        .bind(comment.rating)
        .bind(&comment.interviewer_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DatastoreError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn comments_for_interview(
        &self,
        interview_id: Uuid,
    ) -> Result<Vec<Comment>, DatastoreError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT * FROM comments
            WHERE interview_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
