//! Target platform identifiers.

/// Platform a notification can be targeted at.
///
/// The discriminant is the numeric id the remote API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios = 1,
    BlackBerry = 2,
    Android = 3,
    NokiaAsha = 4,
    WindowsPhone = 5,
    OsX = 7,
    Windows8 = 8,
    Amazon = 9,
    Safari = 10,
}

impl Platform {
    /// All platforms, in id order.
    pub const ALL: [Platform; 9] = [
        Self::Ios,
        Self::BlackBerry,
        Self::Android,
        Self::NokiaAsha,
        Self::WindowsPhone,
        Self::OsX,
        Self::Windows8,
        Self::Amazon,
        Self::Safari,
    ];

    /// Wire id of the platform.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a platform by wire id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Short lowercase name, as accepted by [`str::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::BlackBerry => "blackberry",
            Self::Android => "android",
            Self::NokiaAsha => "nokia-asha",
            Self::WindowsPhone => "windows-phone",
            Self::OsX => "osx",
            Self::Windows8 => "windows8",
            Self::Amazon => "amazon",
            Self::Safari => "safari",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Platform {
    type Err = color_eyre::eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if let Ok(id) = lower.parse::<u8>() {
            return Self::from_id(id)
                .ok_or_else(|| color_eyre::eyre::eyre!("unknown platform id: {}", id));
        }

        Self::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| color_eyre::eyre::eyre!("unknown platform: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids() {
        assert_eq!(Platform::Ios.id(), 1);
        assert_eq!(Platform::Android.id(), 3);
        assert_eq!(Platform::OsX.id(), 7);
        assert_eq!(Platform::Safari.id(), 10);
        // 6 is unassigned
        assert!(Platform::from_id(6).is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("8".parse::<Platform>().unwrap(), Platform::Windows8);
        assert!("palm".parse::<Platform>().is_err());
    }
}
