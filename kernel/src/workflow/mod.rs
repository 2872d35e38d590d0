pub mod identity;
pub mod schedule;
pub mod thesis;

#[cfg(test)]
pub(crate) mod testing;
