pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod store;

pub use error::{Error, Result};
