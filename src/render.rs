//! Colored terminal rendering for nova types.
//!
//! Extension traits that add owo_colors output to nova-core types.

use nova_core::{DayCell, Event, EventColor, ReferenceMonth};
use owo_colors::{OwoColorize, Style};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventColor {
    /// A single colored dot
    fn render(&self) -> String {
        paint(*self, "●")
    }
}

fn paint(color: EventColor, text: &str) -> String {
    match color {
        EventColor::Blue => text.blue().to_string(),
        EventColor::Green => text.green().to_string(),
        EventColor::Purple => text.magenta().to_string(),
        EventColor::Red => text.red().to_string(),
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let when = match (&self.time, &self.end_time) {
            (Some(start), Some(end)) => format!("{}–{}", start, end),
            (Some(start), None) => start.clone(),
            (None, _) => "all-day".to_string(),
        };

        let mut line = format!(
            "{} {:<11} {}",
            self.color().render(),
            when.dimmed(),
            paint(self.color(), &self.title)
        );

        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }

        if self.is_external() {
            line.push_str(&format!(" {}", "(external)".dimmed()));
        } else {
            line.push_str(&format!(" {}", format!("#{}", self.id).dimmed()));
        }

        line
    }
}

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL_WIDTH: usize = 4;

/// Render a month grid: title, weekday header, then two lines per week
/// (day numbers, then event dots).
pub fn render_grid(month: ReferenceMonth, cells: &[DayCell]) -> String {
    let width = WEEKDAYS.len() * CELL_WIDTH;
    let mut lines = vec![
        format!("{:^width$}", month.label()).bold().to_string(),
        WEEKDAYS
            .iter()
            .map(|d| format!("{:>w$}", d, w = CELL_WIDTH - 1))
            .collect::<Vec<_>>()
            .join(" ")
            .dimmed()
            .to_string(),
    ];

    for week in cells.chunks(7) {
        let numbers = week.iter().map(render_day_number).collect::<Vec<_>>();
        let dots = week.iter().map(render_dots).collect::<Vec<_>>();
        lines.push(numbers.join(" "));
        lines.push(dots.join(" "));
    }

    lines.join("\n")
}

fn render_day_number(cell: &DayCell) -> String {
    let text = format!("{:>w$}", cell.day_number, w = CELL_WIDTH - 1);

    let mut style = Style::new();
    if cell.is_other_month {
        style = style.dimmed();
    }
    if cell.is_today {
        style = style.bold().underline();
    }
    if cell.is_selected {
        style = style.reversed();
    }

    text.style(style).to_string()
}

fn render_dots(cell: &DayCell) -> String {
    // Pad before coloring; escape codes would throw off the width
    let padding = " ".repeat((CELL_WIDTH - 1).saturating_sub(cell.event_dots.len()));
    let dots: String = cell.event_dots.iter().map(|c| c.render()).collect();
    format!("{}{}", padding, dots)
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
