//! Per-day lookups over the merged event set.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

use crate::event::{Event, EventSource};

/// All and only the events on `date`, in the order supplied.
pub fn events_on_date(date: NaiveDate, events: &[Event]) -> Vec<&Event> {
    events.iter().filter(|e| e.occurs_on(date)).collect()
}

/// Concatenate local and external events, local first.
///
/// No deduplication. The copies are tagged with the source they were
/// merged from, so edit/delete checks downstream can trust `source`.
pub fn merge_event_sources(local: &[Event], external: &[Event]) -> Vec<Event> {
    let tagged = |events: &[Event], source: EventSource| {
        events
            .iter()
            .map(|e| Event {
                source,
                ..e.clone()
            })
            .collect::<Vec<_>>()
    };

    let mut merged = tagged(local, EventSource::Local);
    merged.extend(tagged(external, EventSource::External));
    merged
}

/// Display order for one day: all-day events first, then by start time.
/// Times that cannot be read sort after the readable ones, by text.
pub fn sort_by_time(events: &mut [&Event]) {
    events.sort_by(|a, b| compare_times(a.time.as_deref(), b.time.as_deref()));
}

fn compare_times(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (parse_time(a), parse_time(b)) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

/// Read the loosely formatted times people type ("15:00", "3:00 PM", "3pm").
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let mut normalized = s.trim().to_uppercase().replace(' ', "");
    // chrono needs minutes; "3PM" becomes "3:00PM"
    if !normalized.contains(':') {
        let split = normalized
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(normalized.len());
        normalized.insert_str(split, ":00");
    }
    ["%H:%M", "%H:%M:%S", "%I:%M%p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
}
