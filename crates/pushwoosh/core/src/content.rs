//! Notification content and scheduling values.

use std::collections::BTreeMap;

/// Text that may be supplied once or per locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Same text for every locale.
    Text(String),
    /// Locale code (e.g. `en`, `de`) to text.
    Localized(BTreeMap<String, String>),
}

impl Content {
    /// Build per-locale content from `(locale, text)` pairs.
    pub fn localized<I, L, T>(variants: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        Self::Localized(
            variants
                .into_iter()
                .map(|(locale, text)| (locale.into(), text.into()))
                .collect(),
        )
    }

    /// Whether there is no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Localized(variants) => variants.is_empty(),
        }
    }

    /// Wire form: a string, or an object keyed by locale.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Localized(variants) => serde_json::Value::Object(
                variants
                    .iter()
                    .map(|(locale, text)| (locale.clone(), serde_json::Value::String(text.clone())))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// When the provider should deliver the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendDate {
    /// Deliver immediately.
    #[default]
    Now,
    /// Deliver at the given wall-clock time.
    At(chrono::NaiveDateTime),
}

impl SendDate {
    /// Sentinel the provider accepts for immediate delivery.
    pub const NOW: &'static str = "now";

    /// Wire form: `now`, or `YYYY-MM-DD H:MM` with a 24-hour, unpadded hour.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Now => Self::NOW.to_string(),
            Self::At(at) => at.format("%Y-%m-%d %-H:%M").to_string(),
        }
    }
}

impl From<chrono::NaiveDateTime> for SendDate {
    fn from(at: chrono::NaiveDateTime) -> Self {
        Self::At(at)
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for SendDate {
    fn from(at: chrono::DateTime<Tz>) -> Self {
        Self::At(at.naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_date_format() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        assert_eq!(SendDate::At(at).to_wire(), "2024-03-05 9:07");

        let evening = chrono::NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 0, 59)
            .unwrap();
        assert_eq!(SendDate::from(evening).to_wire(), "2024-12-31 23:00");
    }

    #[test]
    fn test_send_date_default() {
        assert_eq!(SendDate::default().to_wire(), "now");
    }

    #[test]
    fn test_localized_content() {
        let content = Content::localized([("en", "Hello"), ("de", "Hallo")]);
        assert_eq!(
            content.to_wire(),
            serde_json::json!({"de": "Hallo", "en": "Hello"})
        );
        assert!(Content::localized(Vec::<(String, String)>::new()).is_empty());
    }
}
