use anyhow::{Context, Result};
use nova_core::{ReferenceMonth, build_month_grid_with, events_on_date, sort_by_time};
use owo_colors::OwoColorize;

use super::{CalendarContext, parse_day};
use crate::render::{Render, render_grid};

pub fn run(
    ctx: &CalendarContext,
    month: Option<&str>,
    select: Option<&str>,
    json: bool,
) -> Result<()> {
    let selected = match select {
        Some(s) => parse_day(s, ctx.today)?,
        None => ctx.today,
    };

    let month = match month {
        Some(m) => ReferenceMonth::parse(m)
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", m))?,
        None => ReferenceMonth::containing(selected).context("Selected day is out of range")?,
    };

    let events = ctx.merged();
    let cells = build_month_grid_with(
        ctx.config.grid_options(),
        month,
        ctx.today,
        selected,
        &events,
    );

    if json {
        let output = serde_json::json!({
            "month": month.to_string(),
            "cells": cells,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render_grid(month, &cells));
    println!();

    let mut day_events = events_on_date(selected, &events);
    sort_by_time(&mut day_events);

    println!("{}", selected.format("%A, %B %-d").to_string().bold());
    if day_events.is_empty() {
        println!("   {}", "No events".dimmed());
    }
    for event in day_events {
        println!("   {}", event.render());
    }

    if ctx.config.external_calendar.is_some() && !ctx.external.connected {
        println!();
        println!("{}", "External calendar unavailable".yellow());
    }

    Ok(())
}
