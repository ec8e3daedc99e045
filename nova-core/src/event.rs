//! Source-neutral event types.
//!
//! Local events (authored by the user) and external events (read from a
//! third-party feed) share one `Event` type, told apart by `source`.
//! Serialized with camelCase field names. Loose payloads (numeric ids,
//! empty `time` strings, unknown colors) still load.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::{format_date, parse_date};
use crate::error::{NovaError, NovaResult};

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Empty when a stored record had none; `LocalEvents::load` fills it in.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    /// Wall-clock day as `YYYY-MM-DD`. Kept as text: a malformed value
    /// survives a load/save round-trip and simply matches no day.
    #[serde(default)]
    pub date: String,
    /// Start time, e.g. "15:00" or "3:00 PM". `None` means all day.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Only set for external events
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_color", skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(default)]
    pub source: EventSource,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// The event's day, or `None` if `date` is not a valid `YYYY-MM-DD`.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Exact day match. An unparseable `date` never matches.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.day() == Some(date)
    }

    /// Display color, falling back to the palette default.
    pub fn color(&self) -> EventColor {
        self.color.unwrap_or_default()
    }

    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    pub fn is_external(&self) -> bool {
        self.source == EventSource::External
    }

    /// Check the invariants every stored event must satisfy.
    pub fn validate(&self) -> NovaResult<()> {
        if self.title.trim().is_empty() {
            return Err(NovaError::InvalidEvent("title must not be empty".into()));
        }
        if self.day().is_none() {
            return Err(NovaError::InvalidEvent(format!(
                "invalid date '{}', expected YYYY-MM-DD",
                self.date
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Where an event came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Authored by the user; mutable and persisted by the host application
    #[default]
    Local,
    /// Synced from a third-party calendar; never edited in place
    External,
}

/// Closed palette used to group events visually
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
}

impl EventColor {
    pub const ALL: [EventColor; 4] = [
        EventColor::Blue,
        EventColor::Green,
        EventColor::Purple,
        EventColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Blue => "blue",
            EventColor::Green => "green",
            EventColor::Purple => "purple",
            EventColor::Red => "red",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventColor {
    type Err = NovaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EventColor::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                NovaError::InvalidEvent(format!(
                    "unknown color '{}', expected one of blue, green, purple, red",
                    s
                ))
            })
    }
}

/// Fields for a new local event. The id and source are assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub color: Option<EventColor>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        NewEvent {
            title: title.into(),
            date,
            time: None,
            color: None,
            location: None,
            description: None,
        }
    }

    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            date: format_date(self.date),
            time: blank_to_none(self.time),
            end_time: None,
            color: self.color,
            source: EventSource::Local,
            location: blank_to_none(self.location),
            description: blank_to_none(self.description),
        }
    }
}

/// Partial update for a local event.
///
/// `None` leaves a field alone. For `time`, `location` and `description`
/// an empty string clears the field (an empty `time` makes the event all-day).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub color: Option<EventColor>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    pub(crate) fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title.trim().to_string();
        }
        if let Some(date) = self.date {
            event.date = format_date(date);
        }
        if let Some(time) = self.time {
            event.time = blank_to_none(Some(time));
        }
        if let Some(color) = self.color {
            event.color = Some(color);
        }
        if let Some(location) = self.location {
            event.location = blank_to_none(Some(location));
        }
        if let Some(description) = self.description {
            event.description = blank_to_none(Some(description));
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(blank_to_none(value))
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Option<EventColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| s.parse().ok()))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
