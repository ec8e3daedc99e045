//! ICS feed parsing using the icalendar crate's parser.
//!
//! External calendars are read as plain ICS text. Each `VEVENT` becomes a
//! read-only `Event` on the wall-clock day it starts.

use chrono::{Local, NaiveDate, NaiveDateTime};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::date::format_date;
use crate::error::{NovaError, NovaResult};
use crate::event::{Event, EventSource};

/// Parse every `VEVENT` in `content` into an external event.
///
/// Components without a `UID` or a readable `DTSTART` are skipped.
pub fn parse_events(content: &str) -> NovaResult<Vec<Event>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| NovaError::IcsParse(e.to_string()))?;

    let events = calendar
        .components
        .iter()
        .flat_map(vevents)
        .filter_map(|vevent| {
            let event = parse_vevent(vevent);
            if event.is_none() {
                let uid = vevent.find_prop("UID").map(|p| p.val.to_string());
                tracing::warn!(?uid, "skipping VEVENT without a usable UID/DTSTART");
            }
            event
        })
        .collect();

    Ok(events)
}

/// VEVENTs may sit at the top level or inside a VCALENDAR component,
/// depending on how the parser nested them.
fn vevents<'a>(component: &'a Component<'a>) -> Vec<&'a Component<'a>> {
    if component.name == "VEVENT" {
        vec![component]
    } else {
        component
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect()
    }
}

fn parse_vevent(vevent: &Component) -> Option<Event> {
    let id = vevent.find_prop("UID")?.val.to_string();
    let start = wall_clock(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(wall_clock);

    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "(No title)".to_string());

    let (date, time) = match start {
        WallClock::Day(d) => (d, None),
        WallClock::Time(dt) => (dt.date(), Some(dt.format("%H:%M").to_string())),
    };

    // All-day events have an exclusive DTEND date, which is not a time
    let end_time = match end {
        Some(WallClock::Time(dt)) => Some(dt.format("%H:%M").to_string()),
        _ => None,
    };

    Some(Event {
        id,
        title,
        date: format_date(date),
        time,
        end_time,
        color: None,
        source: EventSource::External,
        location: text_prop(vevent, "LOCATION"),
        description: text_prop(vevent, "DESCRIPTION"),
    })
}

fn text_prop(vevent: &Component, name: &str) -> Option<String> {
    vevent
        .find_prop(name)
        .map(|p| p.val.to_string())
        .filter(|s| !s.trim().is_empty())
}

enum WallClock {
    Day(NaiveDate),
    Time(NaiveDateTime),
}

/// Convert icalendar's DatePerhapsTime to the user's wall clock.
/// UTC values are shifted to local time; zoned and floating values are
/// taken as written.
fn wall_clock(dpt: DatePerhapsTime) -> WallClock {
    match dpt {
        DatePerhapsTime::Date(d) => WallClock::Day(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => WallClock::Time(dt.with_timezone(&Local).naive_local()),
            CalendarDateTime::Floating(naive) => WallClock::Time(naive),
            CalendarDateTime::WithTimezone { date_time, .. } => WallClock::Time(date_time),
        },
    }
}
