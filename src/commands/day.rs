use anyhow::Result;
use nova_core::{events_on_date, sort_by_time};
use owo_colors::OwoColorize;

use super::{CalendarContext, parse_day};
use crate::render::{Render, pluralize};

pub fn run(ctx: &CalendarContext, date: Option<&str>, json: bool) -> Result<()> {
    let date = match date {
        Some(s) => parse_day(s, ctx.today)?,
        None => ctx.today,
    };

    let events = ctx.merged();
    let mut day_events = events_on_date(date, &events);
    sort_by_time(&mut day_events);

    if json {
        println!("{}", serde_json::to_string_pretty(&day_events)?);
        return Ok(());
    }

    println!(
        "{} {}",
        date.format("%A, %B %-d, %Y").to_string().bold(),
        format!("({} {})", day_events.len(), pluralize("event", day_events.len())).dimmed()
    );
    for event in day_events {
        println!("   {}", event.render());
        if let Some(description) = &event.description {
            println!("      {}", description.dimmed());
        }
    }

    Ok(())
}
