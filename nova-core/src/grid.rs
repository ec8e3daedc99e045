//! Month grid generation.
//!
//! A grid always covers whole weeks (Sunday first): leading cells from the
//! previous month, every day of the reference month, then trailing cells
//! from the next month up to the next multiple of seven.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::date::ReferenceMonth;
use crate::event::{Event, EventColor};

/// Number of event dots shown per cell unless the caller asks otherwise.
pub const DEFAULT_MAX_EVENT_DOTS: usize = 3;

/// A single cell of the rendered month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day_number: u32,
    pub date: NaiveDate,
    pub is_other_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// One color per event on this day, capped at `GridOptions::max_event_dots`
    pub event_dots: Vec<EventColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub max_event_dots: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            max_event_dots: DEFAULT_MAX_EVENT_DOTS,
        }
    }
}

/// Build the grid for `month` with the default options.
pub fn build_month_grid(
    month: ReferenceMonth,
    today: NaiveDate,
    selected: NaiveDate,
    events: &[Event],
) -> Vec<DayCell> {
    build_month_grid_with(GridOptions::default(), month, today, selected, events)
}

pub fn build_month_grid_with(
    options: GridOptions,
    month: ReferenceMonth,
    today: NaiveDate,
    selected: NaiveDate,
    events: &[Event],
) -> Vec<DayCell> {
    let first_weekday = month.first_weekday();
    let days_in_month = month.days_in_month();
    let days_in_prev_month = month.days_in_prev_month();

    let total_cells = (first_weekday + days_in_month).div_ceil(7) * 7;
    let trailing = total_cells - first_weekday - days_in_month;

    let leading_days = (0..first_weekday).rev().map(|i| {
        let day_number = days_in_prev_month - i;
        (day_number, nth_day(month.prev_first_day(), day_number), true)
    });
    let current_days =
        (1..=days_in_month).map(|day| (day, nth_day(month.first_day(), day), false));
    let trailing_days =
        (1..=trailing).map(|day| (day, nth_day(month.next_first_day(), day), true));

    leading_days
        .chain(current_days)
        .chain(trailing_days)
        .map(|(day_number, date, is_other_month)| DayCell {
            day_number,
            date,
            is_other_month,
            is_today: date == today,
            is_selected: date == selected,
            event_dots: event_dots(date, events, options.max_event_dots),
        })
        .collect()
}

/// The `day`th day of the month starting at `first` (1-based).
fn nth_day(first: NaiveDate, day: u32) -> NaiveDate {
    // ReferenceMonth guarantees `first` and its neighbours are in range,
    // so offsets below 31 days always succeed.
    first
        .checked_add_days(Days::new(u64::from(day - 1)))
        .unwrap_or(first)
}

fn event_dots(date: NaiveDate, events: &[Event], max: usize) -> Vec<EventColor> {
    events
        .iter()
        .filter(|e| e.occurs_on(date))
        .take(max)
        .map(Event::color)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventSource;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, on: &str, color: Option<EventColor>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            date: on.to_string(),
            time: None,
            end_time: None,
            color,
            source: EventSource::Local,
            location: None,
            description: None,
        }
    }

    #[test]
    fn february_2024_layout() {
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 10), date(2024, 2, 10), &[]);

        assert_eq!(grid.len(), 35);

        let leading: Vec<u32> = grid[..4].iter().map(|c| c.day_number).collect();
        assert_eq!(leading, vec![28, 29, 30, 31]);
        assert!(grid[..4].iter().all(|c| c.is_other_month));
        assert_eq!(grid[0].date, date(2024, 1, 28));

        let current: Vec<&DayCell> = grid.iter().filter(|c| !c.is_other_month).collect();
        assert_eq!(current.len(), 29);
        assert_eq!(current.last().unwrap().date, date(2024, 2, 29));

        let trailing: Vec<u32> = grid[33..].iter().map(|c| c.day_number).collect();
        assert_eq!(trailing, vec![1, 2]);
        assert_eq!(grid[34].date, date(2024, 3, 2));
    }

    #[test]
    fn every_month_fills_whole_weeks() {
        for year in [1999, 2000, 2023, 2024, 2026] {
            for index in 0..12 {
                let month = ReferenceMonth::new(year, index).unwrap();
                let grid = build_month_grid(month, date(2024, 1, 1), date(2024, 1, 1), &[]);

                assert_eq!(grid.len() % 7, 0, "{}", month);
                assert!((28..=42).contains(&grid.len()), "{}", month);

                let numbers: Vec<u32> = grid
                    .iter()
                    .filter(|c| !c.is_other_month)
                    .map(|c| c.day_number)
                    .collect();
                let expected: Vec<u32> = (1..=month.days_in_month()).collect();
                assert_eq!(numbers, expected, "{}", month);
            }
        }
    }

    #[test]
    fn four_row_february() {
        // February 2015 starts on a Sunday and has 28 days
        let month = ReferenceMonth::new(2015, 1).unwrap();
        let grid = build_month_grid(month, date(2015, 2, 1), date(2015, 2, 1), &[]);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|c| !c.is_other_month));
    }

    #[test]
    fn six_row_month() {
        // August 2026 starts on a Saturday and has 31 days
        let month = ReferenceMonth::new(2026, 7).unwrap();
        let grid = build_month_grid(month, date(2026, 8, 1), date(2026, 8, 1), &[]);
        assert_eq!(grid.len(), 42);
    }

    #[test]
    fn cell_dates_are_consecutive() {
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 1), date(2024, 2, 1), &[]);
        for pair in grid.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
        assert_eq!(grid[0].date.weekday().num_days_from_sunday(), 0);
    }

    #[test]
    fn december_trailing_cells_roll_into_next_year() {
        // December 2024 ends on a Tuesday
        let month = ReferenceMonth::new(2024, 11).unwrap();
        let grid = build_month_grid(month, date(2024, 12, 1), date(2024, 12, 1), &[]);

        let trailing: Vec<NaiveDate> = grid
            .iter()
            .skip_while(|c| c.is_other_month)
            .filter(|c| c.is_other_month)
            .map(|c| c.date)
            .collect();
        assert_eq!(
            trailing,
            vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3), date(2025, 1, 4)]
        );
    }

    #[test]
    fn january_leading_cells_roll_into_previous_year() {
        // January 2025 starts on a Wednesday
        let month = ReferenceMonth::new(2025, 0).unwrap();
        let grid = build_month_grid(month, date(2025, 1, 1), date(2025, 1, 1), &[]);

        let leading: Vec<NaiveDate> = grid
            .iter()
            .take_while(|c| c.is_other_month)
            .map(|c| c.date)
            .collect();
        assert_eq!(
            leading,
            vec![date(2024, 12, 29), date(2024, 12, 30), date(2024, 12, 31)]
        );
    }

    #[test]
    fn today_marked_in_overflow_cells() {
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 1, 30), date(2024, 2, 5), &[]);

        let today: Vec<&DayCell> = grid.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert!(today[0].is_other_month);
        assert_eq!(today[0].day_number, 30);
    }

    #[test]
    fn today_outside_grid_marks_nothing() {
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 6, 1), date(2024, 2, 5), &[]);

        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 0);
        let selected: Vec<&DayCell> = grid.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2024, 2, 5));
    }

    #[test]
    fn leap_day_event_only_dots_its_cell() {
        let events = vec![event("1", "2024-02-29", Some(EventColor::Green))];
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 1), date(2024, 2, 1), &events);

        let dotted: Vec<&DayCell> = grid.iter().filter(|c| !c.event_dots.is_empty()).collect();
        assert_eq!(dotted.len(), 1);
        assert_eq!(dotted[0].date, date(2024, 2, 29));
        assert_eq!(dotted[0].event_dots, vec![EventColor::Green]);
    }

    #[test]
    fn dots_are_capped_in_supplied_order() {
        let events = vec![
            event("1", "2024-02-10", Some(EventColor::Red)),
            event("2", "2024-02-10", None),
            event("3", "2024-02-10", Some(EventColor::Purple)),
            event("4", "2024-02-10", Some(EventColor::Green)),
        ];
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 1), date(2024, 2, 1), &events);

        let cell = grid.iter().find(|c| c.date == date(2024, 2, 10)).unwrap();
        assert_eq!(
            cell.event_dots,
            vec![EventColor::Red, EventColor::Blue, EventColor::Purple]
        );
    }

    #[test]
    fn custom_dot_cap() {
        let events = vec![
            event("1", "2024-02-10", None),
            event("2", "2024-02-10", None),
        ];
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let options = GridOptions { max_event_dots: 1 };
        let grid =
            build_month_grid_with(options, month, date(2024, 2, 1), date(2024, 2, 1), &events);

        let cell = grid.iter().find(|c| c.date == date(2024, 2, 10)).unwrap();
        assert_eq!(cell.event_dots.len(), 1);
    }

    #[test]
    fn overflow_cells_get_dots_too() {
        let events = vec![event("1", "2024-01-29", Some(EventColor::Red))];
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 1), date(2024, 2, 1), &events);

        assert_eq!(grid[1].date, date(2024, 1, 29));
        assert_eq!(grid[1].event_dots, vec![EventColor::Red]);
    }

    #[test]
    fn malformed_event_dates_are_ignored() {
        let events = vec![event("1", "29/02/2024", None), event("2", "", None)];
        let month = ReferenceMonth::new(2024, 1).unwrap();
        let grid = build_month_grid(month, date(2024, 2, 1), date(2024, 2, 1), &events);
        assert!(grid.iter().all(|c| c.event_dots.is_empty()));
    }
}
