//! Pushwoosh Core Types
//!
//! Notification model and wire serialization for the Pushwoosh remote API.

mod condition;
mod content;
mod device;
mod message;
mod platform;
mod serialize;
mod wns;

pub use condition::*;
pub use content::*;
pub use device::*;
pub use message::*;
pub use platform::*;
pub use serialize::*;
pub use wns::*;
