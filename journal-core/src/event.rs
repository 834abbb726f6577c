use std::fmt;

use serde::{Deserialize, Serialize};

/// ID của sự kiện; widget có thể trả về chuỗi hoặc số.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EventId {
    Text(String),
    Number(f64),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Text(text) => f.write_str(text),
            EventId::Number(value) => write_js_number(f, *value),
        }
    }
}

/// In số giống `String(number)` của JS: dạng thập phân dưới 1e21, dạng mũ
/// `1e+21` từ đó trở lên.
fn write_js_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == 0.0 {
        return f.write_str("0");
    }
    if !value.is_finite() {
        return f.write_str(match value {
            v if v.is_nan() => "NaN",
            v if v > 0.0 => "Infinity",
            _ => "-Infinity",
        });
    }
    if value.abs() < 1e21 {
        return write!(f, "{value}");
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
        _ => f.write_str(&exponential),
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        EventId::Text(value)
    }
}

impl From<u64> for EventId {
    fn from(value: u64) -> Self {
        EventId::Number(value as f64)
    }
}

/// Hai thuộc tính duy nhất loader đọc từ sự kiện của widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    pub class_name: String,
    pub id: EventId,
}

impl EventRef {
    pub fn new(class_name: impl Into<String>, id: impl Into<EventId>) -> Self {
        Self {
            class_name: class_name.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class_name, self.id)
    }
}
