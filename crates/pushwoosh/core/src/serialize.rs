//! Wire serialization of messages.

use serde_json::Value;

use crate::{Content, Message, Toast, WnsType};

/// Serialized notification, keyed by wire field name in field-table order.
pub type WireMap = serde_json::Map<String, Value>;

/// Attributes that only feed other fields and are never sent themselves.
pub const CONVENIENCE_FIELDS: &[&str] = &["wnsToastType", "imageUri", "secondaryContent"];

type Getter = fn(&Message) -> Option<Value>;

/// Message attributes in wire order.
const FIELDS: &[(&str, Getter)] = &[
    ("data", |m: &Message| m.data.clone()),
    ("content", |m: &Message| m.content.as_ref().map(Content::to_wire)),
    ("secondaryContent", |m: &Message| {
        Some(Value::from(m.secondary_content.clone()))
    }),
    ("imageUri", |m: &Message| m.image_uri.clone().map(Value::String)),
    ("sendDate", |m: &Message| Some(Value::String(m.send_date.to_wire()))),
    ("ignoreUserTimezone", |m: &Message| Some(Value::Bool(m.ignore_user_timezone))),
    ("pageId", |m: &Message| m.page_id.map(Value::from)),
    ("link", |m: &Message| m.link.clone().map(Value::String)),
    ("minimizeLink", |m: &Message| m.minimize_link.map(Value::from)),
    ("sendRate", |m: &Message| m.send_rate.map(Value::from)),
    ("devices", |m: &Message| {
        Some(m.devices().iter().map(|d| Value::String(d.id.clone())).collect())
    }),
    ("conditions", |m: &Message| {
        Some(m.conditions().iter().map(|c| c.to_wire()).collect())
    }),
    ("platforms", |m: &Message| {
        Some(m.platforms.iter().map(|p| Value::from(p.id())).collect())
    }),
    ("iosBadges", |m: &Message| m.ios_badges.map(Value::from)),
    ("iosSound", |m: &Message| m.ios_sound.clone().map(Value::String)),
    ("iosTtl", |m: &Message| m.ios_ttl.map(Value::from)),
    ("iosRootParams", |m: &Message| m.ios_root_params.clone().map(Value::Object)),
    ("apnsTrimContent", |m: &Message| Some(Value::from(u8::from(m.apns_trim_content)))),
    ("androidRootParams", |m: &Message| {
        m.android_root_params.clone().map(Value::Object)
    }),
    ("androidSound", |m: &Message| m.android_sound.clone().map(Value::String)),
    ("androidHeader", |m: &Message| m.android_header.clone().map(Value::String)),
    ("androidBanner", |m: &Message| m.android_banner.clone().map(Value::String)),
    ("androidGcmTtl", |m: &Message| m.android_gcm_ttl.map(Value::from)),
    ("wnsType", |m: &Message| m.wns_type.map(|t| Value::from(t.as_str()))),
    ("wnsToastType", |m: &Message| Some(Value::from(m.wns_toast_type.number()))),
    ("wnsContent", Message::wns_content_wire),
    ("wnsTag", |m: &Message| m.wns_tag.clone().map(Value::String)),
];

/// Project an attribute name onto its wire name (`iosBadges` -> `ios_badges`).
pub fn snake(attribute: &str) -> String {
    let mut wire = String::with_capacity(attribute.len() + 4);
    for (i, c) in attribute.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                wire.push('_');
            }
            wire.extend(c.to_lowercase());
        } else {
            wire.push(c);
        }
    }
    wire
}

/// Whether a value carries nothing worth sending.
///
/// Falsy scalars (`0`, `false`, `""`) are not empty.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Whether a payload is too blank to become a toast `launch` argument.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        other => is_empty(other),
    }
}

impl Message {
    /// Serialize into the provider's flat notification object.
    ///
    /// Null and empty-container values are omitted, as are
    /// [`CONVENIENCE_FIELDS`] and `send_rate` on device-targeted sends.
    pub fn serialize(&self) -> WireMap {
        let mut wire = WireMap::new();

        for &(attribute, get) in FIELDS {
            if CONVENIENCE_FIELDS.contains(&attribute) {
                continue;
            }

            // Not supported for device specific sends.
            if attribute == "sendRate" && self.is_targeted() {
                continue;
            }

            let Some(value) = get(self) else {
                continue;
            };

            if !is_empty(&value) {
                wire.insert(snake(attribute), value);
            }
        }

        wire
    }

    /// `wns_content` as supplied, or a generated toast when none was supplied.
    fn wns_content_wire(&self) -> Option<Value> {
        match &self.wns_content {
            Some(content) if !content.is_empty() => return Some(content.to_wire()),
            supplied if self.wns_type != Some(WnsType::Toast) => {
                return supplied.as_ref().map(Content::to_wire);
            }
            _ => {}
        }

        let launch = self
            .data
            .as_ref()
            .filter(|data| !is_falsy(data))
            .map(Value::to_string);

        let encode = |text: &str| {
            Toast {
                toast_type: self.wns_toast_type,
                text,
                secondary: &self.secondary_content,
                image_uri: self.image_uri.as_deref(),
                launch: launch.clone(),
            }
            .encode()
        };

        let value = match &self.content {
            Some(Content::Localized(variants)) if !variants.is_empty() => Value::Object(
                variants
                    .iter()
                    .map(|(locale, text)| (locale.clone(), Value::String(encode(text))))
                    .collect(),
            ),
            Some(Content::Text(text)) => Value::String(encode(text)),
            _ => Value::String(encode("")),
        };

        Some(value)
    }
}
