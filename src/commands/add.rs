use anyhow::Result;
use chrono::{Days, Utc};
use nova_core::{EventColor, NewEvent};
use owo_colors::OwoColorize;

use super::{CalendarContext, parse_day};
use crate::render::Render;

pub struct AddArgs {
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub color: Option<EventColor>,
    pub location: Option<String>,
    pub description: Option<String>,
}

pub fn run(ctx: &mut CalendarContext, args: AddArgs) -> Result<()> {
    // Quick-add lands on tomorrow unless a date is given
    let date = match args.date.as_deref() {
        Some(s) => parse_day(s, ctx.today)?,
        None => ctx.today.checked_add_days(Days::new(1)).unwrap_or(ctx.today),
    };

    let new_event = NewEvent {
        title: args.title,
        date,
        time: args.time,
        color: args.color,
        location: args.location,
        description: args.description,
    };

    let event = ctx.local.create(new_event, Utc::now())?.clone();
    ctx.save()?;

    println!("{} {}", "Added".green(), event.date.dimmed());
    println!("   {}", event.render());

    Ok(())
}
