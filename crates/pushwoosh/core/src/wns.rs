//! Windows Notification Services payloads.
//!
//! Toast schema: <http://msdn.microsoft.com/en-us/library/windows/apps/br230849.aspx>

use base64::Engine as _;

/// WNS notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WnsType {
    Tile,
    #[default]
    Toast,
    Badge,
    Raw,
}

impl WnsType {
    /// Provider name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tile => "Tile",
            Self::Toast => "Toast",
            Self::Badge => "Badge",
            Self::Raw => "Raw",
        }
    }
}

impl std::fmt::Display for WnsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toast template family, selecting how many text lines are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ToastType {
    /// One text line.
    #[default]
    One = 1,
    /// Header plus wrapped body.
    Two = 2,
    /// Wrapped header plus body.
    Three = 3,
}

impl ToastType {
    /// Template number used in `ToastText0<n>`.
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Toast document built from message fields.
#[derive(Debug, Clone)]
pub struct Toast<'a> {
    /// Template family.
    pub toast_type: ToastType,
    /// Primary text (id 1).
    pub text: &'a str,
    /// Extra lines; only rendered for template families above [`ToastType::One`].
    pub secondary: &'a [String],
    /// Image shown alongside the text.
    pub image_uri: Option<&'a str>,
    /// Value of the root `launch` attribute.
    pub launch: Option<String>,
}

impl Toast<'_> {
    /// Template name for the binding element.
    pub fn template(&self) -> String {
        if self.image_uri.is_some() {
            format!("ToastImageAndText0{}", self.toast_type.number())
        } else {
            format!("ToastText0{}", self.toast_type.number())
        }
    }

    /// Render the XML document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\"?>\n<toast");
        if let Some(launch) = &self.launch {
            push_attr(&mut xml, "launch", launch);
        }
        xml.push_str("><visual><binding");
        push_attr(&mut xml, "template", &self.template());
        xml.push('>');

        if let Some(src) = self.image_uri {
            xml.push_str("<image");
            push_attr(&mut xml, "id", "1");
            push_attr(&mut xml, "src", src);
            push_attr(&mut xml, "alt", "");
            xml.push_str("/>");
        }

        let mut lines = vec![self.text];
        if self.toast_type > ToastType::One {
            lines.extend(self.secondary.iter().map(String::as_str));
        }

        for (id, line) in (1..).zip(lines) {
            xml.push_str("<text");
            push_attr(&mut xml, "id", &id.to_string());
            xml.push('>');
            xml.push_str(&escape(line));
            xml.push_str("</text>");
        }

        xml.push_str("</binding></visual></toast>\n");
        xml
    }

    /// Render and base64-encode the document, as carried in `wns_content`.
    pub fn encode(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_xml())
    }
}

fn push_attr(xml: &mut String, name: &str, value: &str) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(&escape(value));
    xml.push('"');
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // Not representable in XML 1.0.
            '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_toast() {
        let toast = Toast {
            toast_type: ToastType::One,
            text: "Hello",
            secondary: &[],
            image_uri: None,
            launch: None,
        };

        assert_eq!(
            toast.to_xml(),
            "<?xml version=\"1.0\"?>\n<toast><visual><binding template=\"ToastText01\">\
             <text id=\"1\">Hello</text></binding></visual></toast>\n"
        );
    }

    #[test]
    fn test_image_toast_with_secondary_lines() {
        let secondary = vec!["second".to_string(), "third".to_string()];
        let toast = Toast {
            toast_type: ToastType::Two,
            text: "first",
            secondary: &secondary,
            image_uri: Some("http://example.com/a.png"),
            launch: Some(r#"{"id":7}"#.to_string()),
        };

        let xml = toast.to_xml();
        assert!(xml.contains(r#"<toast launch="{&quot;id&quot;:7}">"#));
        assert!(xml.contains(r#"template="ToastImageAndText02""#));
        assert!(xml.contains(r#"<image id="1" src="http://example.com/a.png" alt=""/>"#));
        assert!(xml.contains(r#"<text id="1">first</text>"#));
        assert!(xml.contains(r#"<text id="2">second</text>"#));
        assert!(xml.contains(r#"<text id="3">third</text>"#));
    }

    #[test]
    fn test_secondary_lines_ignored_for_type_one() {
        let secondary = vec!["ignored".to_string()];
        let toast = Toast {
            toast_type: ToastType::One,
            text: "a & b",
            secondary: &secondary,
            image_uri: None,
            launch: None,
        };

        let xml = toast.to_xml();
        assert!(xml.contains("<text id=\"1\">a &amp; b</text>"));
        assert!(!xml.contains("ignored"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let secondary = vec!["tab\there\u{1f}".to_string()];
        let toast = Toast {
            toast_type: ToastType::Two,
            text: "bell\u{7}\u{1}",
            secondary: &secondary,
            image_uri: None,
            launch: Some("a\u{0}\nb".to_string()),
        };

        let xml = toast.to_xml();
        assert!(xml.contains("<text id=\"1\">bell</text>"));
        assert!(xml.contains("<text id=\"2\">tab\there</text>"));
        assert!(xml.contains("launch=\"a\nb\""));
        assert!(!xml.chars().any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')));
    }
}
