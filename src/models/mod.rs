pub mod comment;
pub mod interview;
pub mod user;
