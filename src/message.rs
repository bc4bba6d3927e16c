use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::SiteConfig;

pub const NOT_INFORMED: &str = "Não informado";

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// A finished, line-joined WhatsApp message. Built once, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage(String);

impl OutboundMessage {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn whatsapp_url(&self, config: &SiteConfig) -> String {
        format!(
            "{}?text={}",
            config.whatsapp_endpoint(),
            encode_component(&self.0)
        )
    }
}

/// Opens an outbound URL in a new browsing context.
pub trait Launcher {
    fn open(&self, url: &str);
}

/// Falls back to the placeholder when a free-text value is blank after trimming.
pub fn text_or_placeholder(value: Option<&str>) -> &str {
    value_or(value.map(str::trim), NOT_INFORMED)
}

/// Same as [`text_or_placeholder`] for controls whose value is used verbatim
/// (selects, radios).
pub fn value_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}
