//! Device targets.

/// A device that should receive a targeted send.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    /// Push token or hardware id as registered with the provider.
    pub id: String,
}

impl Device {
    /// Create a device from its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for Device {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Device {
    fn from(id: String) -> Self {
        Self { id }
    }
}
