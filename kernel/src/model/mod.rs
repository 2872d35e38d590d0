pub mod auth;
pub mod id;
pub mod list;
pub mod role;
pub mod schedule;
pub mod thesis;
pub mod user;
