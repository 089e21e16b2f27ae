use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::interview::{Interview, InterviewStatus};

/// Effective lifecycle phase of a meeting as shown to clients. Derived from
/// the stored status and the clock at read time; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Upcoming,
    Ongoing,
    Completed,
}

/// A finalized stored status wins outright; otherwise the one-hour live
/// window `[start, start + 1h)` decides. An interview never marked completed
/// reads as `Completed` once the window has passed, even though its stored
/// status still says `upcoming`.
pub fn resolve_phase(interview: &Interview, now: DateTime<Utc>) -> Phase {
    if matches!(
        interview.status,
        InterviewStatus::Completed | InterviewStatus::Succeeded | InterviewStatus::Failed
    ) {
        return Phase::Completed;
    }

    let start = interview.start_time;

    // A start so late the window overflows has no live phase; the clock
    // comparison below decides.
    if let Some(live_until) = start.checked_add_signed(Duration::hours(1)) {
        if now >= start && now < live_until {
            return Phase::Ongoing;
        }
    }

    if now < start {
        Phase::Upcoming
    } else {
        Phase::Completed
    }
}

/// Dashboard buckets, each preserving the input order of its members.
#[derive(Debug, Default)]
pub struct GroupedInterviews {
    pub succeeded: Vec<Interview>,
    pub failed: Vec<Interview>,
    pub completed: Vec<Interview>,
    pub upcoming: Vec<Interview>,
}

/// Single pass over the input. A stored verdict (`succeeded` / `failed`)
/// short-circuits; everything else is bucketed strictly by start time, so a
/// stored `completed` that has not started yet still counts as upcoming
/// here. Note this uses no live window, unlike `resolve_phase`.
pub fn group_interviews(interviews: Vec<Interview>, now: DateTime<Utc>) -> GroupedInterviews {
    let mut groups = GroupedInterviews::default();

    for interview in interviews {
        match interview.status {
            InterviewStatus::Succeeded => groups.succeeded.push(interview),
            InterviewStatus::Failed => groups.failed.push(interview),
            _ => {
                // A start exactly at `now` matches neither comparison.
                if interview.start_time < now {
                    groups.completed.push(interview);
                } else if interview.start_time > now {
                    groups.upcoming.push(interview);
                }
            }
        }
    }

    groups
}
