pub mod contacts;
pub mod pool;
pub mod schema;
pub mod seed;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
