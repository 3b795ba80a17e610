use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::model::FieldKind;

/// Wire format of date-time values inside payloads
pub const PAYLOAD_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const PAYLOAD_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Current value of one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    DateTime(NaiveDateTime),
}

/// Field name to value, for a single field-set
pub type FormValues = BTreeMap<String, FieldValue>;

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Empty values and blank text fail a required check.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::DateTime(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(instant) => Some(*instant),
            _ => None,
        }
    }

    /// Normalises a value for the field kind it is bound to.
    ///
    /// Date-time fields turn parseable text into instants and keep anything else
    /// as text so validation can report it; other fields hold text only.
    pub fn coerce_for(self, kind: &FieldKind) -> Self {
        match (kind, self) {
            (FieldKind::Column { .. }, _) => FieldValue::Empty,
            (FieldKind::DateTime { .. }, FieldValue::Text(text)) if text.trim().is_empty() => {
                FieldValue::Empty
            }
            (FieldKind::DateTime { format, .. }, FieldValue::Text(text)) => {
                let display = format.as_deref().unwrap_or(super::model::DEFAULT_DATE_TIME_FORMAT);
                match parse_date_time(&text, display) {
                    Some(instant) => FieldValue::DateTime(instant),
                    None => FieldValue::Text(text),
                }
            }
            (FieldKind::DateTime { .. }, value) => value,
            (_, FieldValue::DateTime(instant)) => {
                FieldValue::Text(instant.format(PAYLOAD_DATE_TIME_FORMAT).to_string())
            }
            (_, value) => value,
        }
    }

    /// Text shown in the bound control; date-times use the display format.
    pub fn display(&self, format: &str) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::DateTime(instant) => instant.format(&to_chrono_format(format)).to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Empty => serializer.serialize_none(),
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::DateTime(instant) => {
                serializer.collect_str(&instant.format(PAYLOAD_DATE_TIME_FORMAT))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<RawValue>::deserialize(deserializer)? {
            None => FieldValue::Empty,
            Some(RawValue::Text(text)) => FieldValue::Text(text),
            Some(RawValue::Number(number)) => FieldValue::Text(number.to_string()),
            Some(RawValue::Flag(flag)) => FieldValue::Text(flag.to_string()),
        })
    }
}

/// Tokens of the `DD/MM/YYYY HH:mm` display style, in matching order
pub const DISPLAY_TOKENS: [&str; 6] = ["YYYY", "DD", "MM", "HH", "mm", "ss"];

/// Rewrites a display format token by token. `replacements[i]` stands in for
/// `DISPLAY_TOKENS[i]`; every other character goes through `literal`.
pub fn translate_display_format<F>(display: &str, replacements: [&str; 6], literal: F) -> String
where
    F: Fn(char, &mut String),
{
    let mut out = String::with_capacity(display.len() + 4);
    let mut rest = display;
    'outer: while !rest.is_empty() {
        for (token, replacement) in DISPLAY_TOKENS.into_iter().zip(replacements) {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            literal(c, &mut out);
        }
        rest = chars.as_str();
    }
    out
}

/// Translates a `DD/MM/YYYY HH:mm` style display format into a chrono format string.
pub fn to_chrono_format(display: &str) -> String {
    translate_display_format(display, ["%Y", "%d", "%m", "%H", "%M", "%S"], |c, out| {
        if c == '%' {
            out.push('%');
        }
        out.push(c);
    })
}

/// Parses typed or stored date-time text, trying the display format first
/// and then the payload formats.
pub fn parse_date_time(text: &str, display: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    let display = to_chrono_format(display);
    let parsed = std::iter::once(display.as_str())
        .chain(PAYLOAD_INPUT_FORMATS)
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok());
    parsed
}
