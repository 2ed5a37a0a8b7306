//! Application layer - Use cases and ports

pub mod ports;
pub mod services;
