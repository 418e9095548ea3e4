//! Concrete transports behind the engine's capability traits.

pub mod brapi;
pub mod smtp;
