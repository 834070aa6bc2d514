//! Pushwoosh Delivery Client
//!
//! Sends [`pushwoosh_core::Message`]s through the Pushwoosh remote API.

mod client;
mod config;
mod transport;

pub use client::*;
pub use config::*;
pub use transport::*;

// Re-export for convenience
pub use pushwoosh_core;
