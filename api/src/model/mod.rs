pub mod list;
pub mod schedule;
pub mod thesis;
pub mod user;
