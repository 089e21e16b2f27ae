pub mod comments;
pub mod dashboard;
pub mod interviews;
pub mod reminders;
pub mod stream;
pub mod users;
