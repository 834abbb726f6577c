//! Timeline feed JSON parsing and the date helpers used to build feed events.

use chrono::{NaiveDate, NaiveTime};
use journal_core::{
    FeedError, FeedEvent, TimelineFeed, INDETERMINATE_TIME, YEAR_INFINITY, YEAR_ZERO,
};
use serde_json::Value;

/// Parse a timeline feed from a JSON string.
pub fn parse_feed_str(feed_json: &str) -> Result<TimelineFeed, FeedError> {
    let value: Value =
        serde_json::from_str(feed_json).map_err(|err| FeedError::Parse(err.to_string()))?;
    parse_feed_value(&value)
}

/// Parse a timeline feed from a `serde_json::Value`.
///
/// Events without a `classname` or `id` cannot open a details bubble and are
/// dropped. Duration events missing either end are bookended.
pub fn parse_feed_value(feed: &Value) -> Result<TimelineFeed, FeedError> {
    let events = feed
        .get("events")
        .and_then(Value::as_array)
        .ok_or(FeedError::MissingData)?;

    let mut parsed = TimelineFeed {
        wiki_url: string_field(feed, "wiki-url").unwrap_or_default(),
        wiki_section: string_field(feed, "wiki-section").unwrap_or_default(),
        ..TimelineFeed::default()
    };
    if let Some(format) = string_field(feed, "dateTimeFormat") {
        parsed.date_time_format = format;
    }

    for (index, event) in events.iter().enumerate() {
        match parse_event(event) {
            Some(event) => parsed.events.push(event),
            None => log::warn!("Skipping feed event #{index}: missing classname or id"),
        }
    }

    Ok(parsed)
}

fn parse_event(event: &Value) -> Option<FeedEvent> {
    let classname = string_field(event, "classname").filter(|name| !name.is_empty())?;
    let id = id_field(event)?;
    let duration_event = event
        .get("durationEvent")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut start = string_field(event, "start").filter(|start| !start.is_empty());
    let mut end = string_field(event, "end").filter(|end| !end.is_empty());
    if duration_event {
        start.get_or_insert_with(|| YEAR_ZERO.to_string());
        end.get_or_insert_with(|| YEAR_INFINITY.to_string());
    }

    Some(FeedEvent {
        id,
        classname,
        title: string_field(event, "title").unwrap_or_default(),
        start: start.unwrap_or_else(|| YEAR_ZERO.to_string()),
        end,
        duration_event,
        caption: string_field(event, "caption"),
        latest_start: string_field(event, "latestStart"),
        earliest_end: string_field(event, "earliestEnd"),
    })
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

fn id_field(event: &Value) -> Option<String> {
    match event.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Render a date, a time, or both, depending on what is available.
pub fn date_time_string(date: Option<NaiveDate>, time: Option<NaiveTime>) -> String {
    match (date, time) {
        (Some(date), Some(time)) => format!("{} {}", date.format("%Y-%m-%d"), time.format("%H:%M")),
        (Some(date), None) => date.format("%Y-%m-%d").to_string(),
        (None, Some(time)) => time.format("%H:%M").to_string(),
        (None, None) => String::new(),
    }
}

/// Possibly fuzzy bounds of a period, each an optional date plus an optional
/// time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodDates {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub latest_start_date: Option<NaiveDate>,
    pub latest_start_time: Option<NaiveTime>,
    pub earliest_end_date: Option<NaiveDate>,
    pub earliest_end_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

impl PeriodDates {
    pub fn start(&self) -> String {
        date_time_string(self.start_date, self.start_time)
    }

    pub fn latest_start(&self) -> String {
        date_time_string(self.latest_start_date, self.latest_start_time)
    }

    pub fn earliest_end(&self) -> String {
        date_time_string(self.earliest_end_date, self.earliest_end_time)
    }

    pub fn end(&self) -> String {
        date_time_string(self.end_date, self.end_time)
    }
}

/// Render `start ⇒ end` as HTML, marking the fuzzy part of each bound.
pub fn period_dates_html(period: &PeriodDates) -> String {
    let (start, latest_start) = (period.start(), period.latest_start());
    let start = if start.is_empty() {
        INDETERMINATE_TIME.to_string()
    } else if latest_start.is_empty() {
        start
    } else {
        format!(r#"{start} &harr; <span class="fuzzy">{latest_start}</span>"#)
    };

    let (end, earliest_end) = (period.end(), period.earliest_end());
    let end = if end.is_empty() {
        INDETERMINATE_TIME.to_string()
    } else if earliest_end.is_empty() {
        end
    } else {
        format!(r#"<span class="fuzzy">{earliest_end}</span> &harr; {end}"#)
    };

    format!("{start} &rArr; {end}")
}

/// Plain text caption for a period: `summary: start ⇒ end`. Only the dates
/// are shown; times of day are left out.
pub fn period_caption(summary: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let render = |date: Option<NaiveDate>| {
        date.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| INDETERMINATE_TIME.to_string())
    };
    format!("{summary}: {} \u{21D2} {}", render(start), render(end))
}

/// Feed event for something that happened at one point in time.
pub fn instant_event(classname: &str, id: &str, title: &str, start: &str) -> FeedEvent {
    FeedEvent {
        id: id.to_string(),
        classname: classname.to_string(),
        title: title.to_string(),
        start: start.to_string(),
        end: None,
        duration_event: false,
        caption: None,
        latest_start: None,
        earliest_end: None,
    }
}

/// Feed event for a period. Open ends are bookended so the widget can draw
/// them; fuzzy bounds are only emitted when known.
pub fn period_event(classname: &str, id: &str, summary: &str, dates: &PeriodDates) -> FeedEvent {
    let non_empty = |value: String| (!value.is_empty()).then_some(value);

    FeedEvent {
        id: id.to_string(),
        classname: classname.to_string(),
        title: summary.to_string(),
        start: non_empty(dates.start()).unwrap_or_else(|| YEAR_ZERO.to_string()),
        end: Some(non_empty(dates.end()).unwrap_or_else(|| YEAR_INFINITY.to_string())),
        duration_event: true,
        caption: Some(period_caption(summary, dates.start_date, dates.end_date)),
        latest_start: non_empty(dates.latest_start()),
        earliest_end: non_empty(dates.earliest_end()),
    }
}
