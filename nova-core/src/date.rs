//! Calendar dates and the month being displayed.
//!
//! Every date comparison in Nova goes through `NaiveDate`, parsed from and
//! formatted to `YYYY-MM-DD`. Strings are never compared directly.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` wall-clock date. Anything else is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Format a date in the normalized `YYYY-MM-DD` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The (year, zero-based month) pair shown by the calendar view.
///
/// Values are immutable: navigation returns a new `ReferenceMonth`.
/// Construction guarantees the neighbouring months exist too, so grid
/// generation never has to deal with the edge of chrono's date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceMonth {
    first: NaiveDate,
    prev_first: NaiveDate,
    next_first: NaiveDate,
}

impl ReferenceMonth {
    /// Build from a year and a zero-based month index.
    ///
    /// The index may fall outside `0..12`; it is rolled across year
    /// boundaries with calendar arithmetic (`-1` is December of the
    /// previous year, `12` is January of the next).
    pub fn new(year: i32, month_index: i32) -> Option<Self> {
        let january = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let offset = Months::new(month_index.unsigned_abs());
        let first = if month_index >= 0 {
            january.checked_add_months(offset)?
        } else {
            january.checked_sub_months(offset)?
        };
        Self::starting(first)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::starting(date.with_day(1)?)
    }

    /// Parse `YYYY-MM` (one-based month, as typed by people).
    pub fn parse(s: &str) -> Option<Self> {
        let first = parse_date(&format!("{}-01", s.trim()))?;
        Self::starting(first)
    }

    fn starting(first: NaiveDate) -> Option<Self> {
        let prev_first = first.checked_sub_months(Months::new(1))?;
        let next_first = first.checked_add_months(Months::new(1))?;
        Some(ReferenceMonth {
            first,
            prev_first,
            next_first,
        })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month index (0 = January).
    pub fn month_index(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn prev_first_day(&self) -> NaiveDate {
        self.prev_first
    }

    pub fn next_first_day(&self) -> NaiveDate {
        self.next_first
    }

    /// Weekday of the first day, 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        (self.next_first - self.first).num_days() as u32
    }

    pub fn days_in_prev_month(&self) -> u32 {
        (self.first - self.prev_first).num_days() as u32
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date < self.next_first
    }

    pub fn next(&self) -> Option<Self> {
        Self::starting(self.next_first)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::starting(self.prev_first)
    }

    /// Human label, e.g. "February 2024".
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}
