//! Outbound notification model.

use crate::{Condition, Content, Device, Platform, SendDate, ToastType, WnsType};

/// A single notification to be delivered by the provider.
///
/// Unset fields are left out of the wire form entirely; see [`Message::serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Opaque payload delivered alongside the notification.
    pub data: Option<serde_json::Value>,
    /// Notification text.
    pub content: Option<Content>,
    /// Extra toast lines (WNS only, used when building `wns_content`).
    pub secondary_content: Vec<String>,
    /// Toast image (WNS only, used when building `wns_content`).
    pub image_uri: Option<String>,
    /// Delivery time.
    pub send_date: SendDate,
    /// Deliver at `send_date` in UTC rather than each device's local time.
    pub ignore_user_timezone: bool,
    /// Rich page to open.
    pub page_id: Option<i64>,
    /// URL to open.
    pub link: Option<String>,
    /// URL shortener to apply to `link` (0 disables shortening).
    pub minimize_link: Option<i64>,
    /// Pushes per second for broadcast sends.
    pub send_rate: Option<u32>,
    /// Restrict delivery to these platforms.
    pub platforms: Vec<Platform>,

    /// iOS badge count.
    pub ios_badges: Option<i64>,
    /// iOS sound file name.
    pub ios_sound: Option<String>,
    /// APNs time to live, in seconds.
    pub ios_ttl: Option<u64>,
    /// Extra keys merged into the APNs payload root.
    pub ios_root_params: Option<serde_json::Map<String, serde_json::Value>>,
    /// Let the provider trim content that exceeds the APNs payload limit.
    pub apns_trim_content: bool,

    /// Extra keys merged into the Android payload root.
    pub android_root_params: Option<serde_json::Map<String, serde_json::Value>>,
    /// Android sound file name.
    pub android_sound: Option<String>,
    /// Android notification header.
    pub android_header: Option<String>,
    /// Android banner image URI.
    pub android_banner: Option<String>,
    /// GCM time to live, in seconds.
    pub android_gcm_ttl: Option<u64>,

    /// WNS notification kind; `None` leaves WNS out of the send.
    pub wns_type: Option<WnsType>,
    /// Toast template family used when building `wns_content`.
    pub wns_toast_type: ToastType,
    /// Pre-rendered, base64-encoded WNS payload.
    pub wns_content: Option<Content>,
    /// Tile replacement tag.
    pub wns_tag: Option<String>,

    devices: Vec<Device>,
    conditions: Vec<Condition>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            data: None,
            content: None,
            secondary_content: Vec::new(),
            image_uri: None,
            send_date: SendDate::Now,
            ignore_user_timezone: true,
            page_id: None,
            link: None,
            minimize_link: None,
            send_rate: None,
            platforms: Vec::new(),
            ios_badges: None,
            ios_sound: None,
            ios_ttl: None,
            ios_root_params: None,
            apns_trim_content: true,
            android_root_params: None,
            android_sound: None,
            android_header: None,
            android_banner: None,
            android_gcm_ttl: None,
            wns_type: Some(WnsType::Toast),
            wns_toast_type: ToastType::One,
            wns_content: None,
            wns_tag: None,
            devices: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl Message {
    /// Create a message with the given content and default settings.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Add an audience filter, e.g. `("A.tags.offer", "EQ", "winter")`.
    pub fn add_condition(
        &mut self,
        name: impl Into<String>,
        operator: impl Into<String>,
        operand: impl Into<serde_json::Value>,
    ) {
        self.conditions.push(Condition::new(name, operator, operand));
    }

    /// Add a single device to receive the push.
    pub fn add_device(&mut self, device: impl Into<Device>) {
        self.devices.push(device.into());
    }

    /// Add several devices to receive the push.
    pub fn add_devices<I>(&mut self, devices: I)
    where
        I: IntoIterator,
        I::Item: Into<Device>,
    {
        self.devices.extend(devices.into_iter().map(Into::into));
    }

    /// Drop all devices, returning the message to broadcast mode.
    pub fn clear_devices(&mut self) {
        self.devices.clear();
    }

    /// Devices currently targeted.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Audience filters, in insertion order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether the message targets specific devices.
    pub fn is_targeted(&self) -> bool {
        !self.devices.is_empty()
    }
}
