pub mod api_handler;
pub mod transport;

#[cfg(test)]
pub(crate) mod stub;
