use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EventRef, LoaderConfig};

/// Hai timeline mà ứng dụng nhật ký phục vụ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// Sự kiện, giai đoạn và người quen.
    Life,
    /// Nhật ký hằng ngày và hoạt động.
    Diary,
}

impl LineType {
    pub fn as_str(self) -> &'static str {
        match self {
            LineType::Life => "life",
            LineType::Diary => "diary",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "life" => Ok(LineType::Life),
            "diary" => Ok(LineType::Diary),
            other => Err(ConfigError::UnknownLineType(other.to_string())),
        }
    }
}

/// `{base_url}details/{class_name}/{id}/`, ghép nguyên văn, không encode.
pub fn details_url(config: &LoaderConfig, event: &EventRef) -> String {
    format!(
        "{}details/{}/{}/",
        config.base_url(),
        event.class_name,
        event.id
    )
}

/// `{base_url}timeline_json/{line_type}/`
pub fn feed_url(config: &LoaderConfig, line_type: LineType) -> String {
    format!("{}timeline_json/{}/", config.base_url(), line_type)
}
