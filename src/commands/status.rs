use anyhow::Result;
use owo_colors::OwoColorize;

use super::CalendarContext;
use crate::render::pluralize;

pub fn run(ctx: &CalendarContext, json: bool) -> Result<()> {
    let local = ctx.local.len();
    let external = ctx.external.events.len();

    if json {
        let output = serde_json::json!({
            "connected": ctx.external.connected,
            "local_events": local,
            "external_events": external,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Events".bold());
    println!("  Local:     {} {}", local, pluralize("event", local));
    println!("  External:  {} {}", external, pluralize("event", external));

    println!("{}", "External calendar".bold());
    match &ctx.config.external_calendar {
        None => println!("  {}", "Not configured".dimmed()),
        Some(source) if ctx.external.connected => {
            println!("  {} {}", "Connected".green(), source.dimmed())
        }
        Some(source) => println!("  {} {}", "Unavailable".red(), source.dimmed()),
    }

    Ok(())
}
