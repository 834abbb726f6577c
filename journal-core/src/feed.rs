use serde::{Deserialize, Serialize};

use crate::{EventId, EventRef};

/// Widget timeline không chịu khoảng thời gian mở, nên hai đầu được chặn bằng
/// các mốc này.
pub const YEAR_ZERO: &str = "1900-01-01";
pub const YEAR_INFINITY: &str = "2100-01-01";
/// Hiển thị cho mốc thời gian chưa xác định.
pub const INDETERMINATE_TIME: &str = "~";

/// Feed JSON mà widget tải để vẽ timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineFeed {
    #[serde(rename = "wiki-url", default)]
    pub wiki_url: String,
    #[serde(rename = "wiki-section", default)]
    pub wiki_section: String,
    #[serde(rename = "dateTimeFormat", default = "default_date_time_format")]
    pub date_time_format: String,
    pub events: Vec<FeedEvent>,
}

fn default_date_time_format() -> String {
    "iso8601".to_string()
}

impl Default for TimelineFeed {
    fn default() -> Self {
        Self {
            wiki_url: String::new(),
            wiki_section: String::new(),
            date_time_format: default_date_time_format(),
            events: Vec::new(),
        }
    }
}

/// Một sự kiện trong feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    pub id: String,
    #[serde(rename = "classname")]
    pub classname: String,
    pub title: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub duration_event: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_end: Option<String>,
}

impl FeedEvent {
    /// Tham chiếu dùng để dựng URL chi tiết cho bubble.
    pub fn event_ref(&self) -> EventRef {
        EventRef {
            class_name: self.classname.clone(),
            id: EventId::Text(self.id.clone()),
        }
    }
}
