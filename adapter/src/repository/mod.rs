pub mod auth;
pub mod health;
pub mod schedule;
pub mod thesis;
pub mod user;
