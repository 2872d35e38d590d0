pub mod health;
pub mod schedule;
pub mod thesis;
pub mod v1;
