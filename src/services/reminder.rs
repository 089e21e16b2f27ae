use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::models::interview::{Interview, InterviewStatus};
use crate::repositories::Datastore;
use crate::services::directory::candidate_display;

/// Read-only pass over upcoming interviews that logs a reminder for each one
/// starting soon. Never mutates interview state.
pub struct ReminderService {
    pub store: Arc<dyn Datastore>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    pub async fn process_due_reminders(&self) -> Result<usize> {
        self.process_due_reminders_within(Duration::hours(24)).await
    }

    pub async fn process_due_reminders_within(&self, window: Duration) -> Result<usize> {
        let now = Utc::now();
        let interviews = self.store.list_interviews().await?;
        let users = self.store.list_users().await?;

        let due: Vec<Interview> = interviews
            .into_iter()
            .filter(|interview| due_within(interview, now, window))
            .collect();

        for interview in &due {
            let candidate = candidate_display(&users, &interview.candidate_id);
            let address = users
                .iter()
                .find(|user| user.clerk_id == interview.candidate_id)
                .map_or("address unknown", |user| user.email.as_str());
            tracing::info!(
                "Reminder: \"{}\" with {} <{}> starts at {} ({} interviewer(s) invited)",
                interview.title,
                candidate.name,
                address,
                interview.start_time,
                interview.interviewer_ids.len()
            );
            // TODO: swap the log line for real delivery; the address is
            // already resolved.
        }

        Ok(due.len())
    }
}

/// Due iff still `upcoming` and starting within `(now, now + window]`.
pub fn due_within(interview: &Interview, now: DateTime<Utc>, window: Duration) -> bool {
    matches!(interview.status, InterviewStatus::Upcoming)
        && interview.start_time > now
        && interview.start_time <= now + window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::NewInterview;
    use crate::models::user::NewUser;
    use crate::repositories::memory::MemoryDatastore;
    use chrono::TimeZone;
    use tracing_test::traced_test;
    use uuid::Uuid;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn interview(status: InterviewStatus, start: DateTime<Utc>) -> Interview {
        Interview {
            id: Uuid::new_v4(),
            title: "System design".to_string(),
            description: None,
            start_time: start,
            end_time: None,
            status,
            stream_call_id: "call-1".to_string(),
            candidate_id: "user_cand".to_string(),
            interviewer_ids: vec!["user_int".to_string()],
            created_at: start,
        }
    }

    #[test]
    fn due_only_inside_the_window() {
        let now = at(0);
        let window = Duration::hours(24);

        let soon = interview(InterviewStatus::Upcoming, at(3_600));
        assert!(due_within(&soon, now, window));

        let at_window_edge = interview(InterviewStatus::Upcoming, now + window);
        assert!(due_within(&at_window_edge, now, window));

        let beyond = interview(InterviewStatus::Upcoming, now + window + Duration::seconds(1));
        assert!(!due_within(&beyond, now, window));
    }

    #[test]
    fn starting_now_or_earlier_is_not_due() {
        let now = at(10_000);
        let window = Duration::hours(24);

        assert!(!due_within(&interview(InterviewStatus::Upcoming, now), now, window));
        assert!(!due_within(
            &interview(InterviewStatus::Upcoming, at(5_000)),
            now,
            window
        ));
    }

    #[test]
    fn only_upcoming_interviews_are_due() {
        let now = at(0);
        let window = Duration::hours(24);

        for status in [
            InterviewStatus::Completed,
            InterviewStatus::Succeeded,
            InterviewStatus::Failed,
        ] {
            assert!(!due_within(&interview(status, at(3_600)), now, window));
        }
    }

    #[traced_test]
    #[tokio::test]
    async fn processes_only_due_interviews() {
        let store = Arc::new(MemoryDatastore::new());

        store
            .sync_user(NewUser {
                clerk_id: "user_cand".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                image: None,
            })
            .await
            .unwrap();

        let in_an_hour = Utc::now() + Duration::hours(1);
        let next_month = Utc::now() + Duration::days(30);

        for start in [in_an_hour, next_month] {
            store
                .create_interview(NewInterview {
                    title: "System design".to_string(),
                    description: None,
                    start_time: start,
                    end_time: None,
                    status: InterviewStatus::Upcoming,
                    stream_call_id: format!("call-{}", start.timestamp()),
                    candidate_id: "user_cand".to_string(),
                    interviewer_ids: vec!["user_int".to_string()],
                })
                .await
                .unwrap();
        }

        let service = ReminderService::new(store);
        let reminded = service
            .process_due_reminders_within(Duration::hours(48))
            .await
            .unwrap();

        assert_eq!(reminded, 1);
        assert!(logs_contain("Ada Lovelace"));
        assert!(logs_contain("ada@example.com"));
    }
}
