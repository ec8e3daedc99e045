//! Read-only events from a third-party calendar feed.
//!
//! The feed is ICS text from a local file or an `http(s)://` / `webcal://`
//! URL. Whatever goes wrong while fetching or parsing, callers get an
//! `ExternalCalendar` back: failures only flip `connected` to false.

use std::time::Duration;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{NovaError, NovaResult};
use crate::event::{Event, EventColor};
use crate::ics::parse_events;

/// Days ahead of today that external events are kept for.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Inclusive date range external events must start in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ExternalWindow {
    /// `[today, today + days]`
    pub fn starting(today: NaiveDate, days: u64) -> Self {
        let to = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        ExternalWindow { from: today, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Events from the external feed plus whether the last fetch worked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalCalendar {
    pub connected: bool,
    pub events: Vec<Event>,
}

impl ExternalCalendar {
    /// No feed, or the feed could not be read.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Parse ICS text, color every event with `color`, keep those inside
    /// `window`.
    pub fn from_ics(content: &str, window: ExternalWindow, color: EventColor) -> NovaResult<Self> {
        let events = parse_events(content)?
            .into_iter()
            .filter(|e| e.day().is_some_and(|d| window.contains(d)))
            .map(|e| Event {
                color: Some(color),
                ..e
            })
            .collect();

        Ok(ExternalCalendar {
            connected: true,
            events,
        })
    }
}

/// Where an external feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(std::path::PathBuf),
}

impl FeedSource {
    /// `webcal://` is rewritten to `https://`; anything that is not a URL is
    /// treated as a file path (with `~` expanded).
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if let Some(rest) = source.strip_prefix("webcal://") {
            FeedSource::Url(format!("https://{}", rest))
        } else if source.starts_with("http://") || source.starts_with("https://") {
            FeedSource::Url(source.to_string())
        } else {
            FeedSource::File(shellexpand::tilde(source).into_owned().into())
        }
    }

    async fn read(&self) -> NovaResult<String> {
        match self {
            FeedSource::Url(url) => {
                let client = reqwest::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()
                    .map_err(|e| NovaError::Fetch(e.to_string()))?;

                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| NovaError::Fetch(e.to_string()))?;

                response
                    .text()
                    .await
                    .map_err(|e| NovaError::Fetch(e.to_string()))
            }
            FeedSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

/// Fetch and parse the feed. Never fails: errors are logged and reported
/// as a disconnected calendar.
pub async fn fetch_external(
    source: Option<&str>,
    window: ExternalWindow,
    color: EventColor,
) -> ExternalCalendar {
    let Some(source) = source else {
        return ExternalCalendar::disconnected();
    };

    let feed = FeedSource::parse(source);
    let result = match feed.read().await {
        Ok(content) => ExternalCalendar::from_ics(&content, window, color),
        Err(e) => Err(e),
    };

    match result {
        Ok(calendar) => {
            tracing::debug!(
                source,
                events = calendar.events.len(),
                "loaded external calendar"
            );
            calendar
        }
        Err(e) => {
            tracing::warn!(source, error = %e, "external calendar unavailable");
            ExternalCalendar::disconnected()
        }
    }
}
