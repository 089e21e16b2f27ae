pub mod database;
pub mod duration;
pub mod errors;
pub mod jwt;
pub mod logger;
pub mod stream;
