use serde::Serialize;

use crate::models::user::User;

/// What a meeting card needs to render a person: display name, avatar URL
/// (empty when absent), and avatar-fallback initials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayInfo {
    pub name: String,
    pub image: String,
    pub initials: String,
}

pub fn candidate_display(users: &[User], candidate_id: &str) -> DisplayInfo {
    display_for(users, candidate_id, "UC")
}

pub fn interviewer_display(users: &[User], interviewer_id: &str) -> DisplayInfo {
    display_for(users, interviewer_id, "UI")
}

/// Linear scan, first match wins. An unknown id gets the placeholder name
/// and the caller-side fallback initials ("UC" / "UI").
fn display_for(users: &[User], clerk_id: &str, fallback_initials: &str) -> DisplayInfo {
    match users.iter().find(|user| user.clerk_id == clerk_id) {
        Some(user) => DisplayInfo {
            name: user.name.clone(),
            image: user.image.clone().unwrap_or_default(),
            initials: initials(&user.name),
        },
        None => DisplayInfo {
            name: "Unknown Name".to_string(),
            image: String::new(),
            initials: fallback_initials.to_string(),
        },
    }
}

/// First character of every whitespace-separated token, case as typed.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}
