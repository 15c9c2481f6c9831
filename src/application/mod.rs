pub mod controller;
pub mod session;
pub mod sync_client;

#[cfg(test)]
pub(crate) mod test_support;
