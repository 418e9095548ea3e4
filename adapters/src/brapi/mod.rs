pub mod client;
pub mod errors;
pub mod types;

pub use client::{BrapiClient, DEFAULT_BASE_URL};
pub use errors::BrapiError;
pub use types::*;
