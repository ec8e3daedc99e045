use anyhow::Result;
use nova_core::{EventColor, EventPatch};
use owo_colors::OwoColorize;

use super::{CalendarContext, parse_day};
use crate::render::Render;

pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub color: Option<EventColor>,
    pub location: Option<String>,
    pub description: Option<String>,
}

pub fn run(ctx: &mut CalendarContext, id: &str, args: EditArgs) -> Result<()> {
    let date = args
        .date
        .as_deref()
        .map(|s| parse_day(s, ctx.today))
        .transpose()?;

    let patch = EventPatch {
        title: args.title,
        date,
        time: args.time,
        color: args.color,
        location: args.location,
        description: args.description,
    };

    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --title, --date, --time, --color, --location, --description"
        );
    }

    let target = ctx.resolve(id)?;
    let event = ctx.local.update(&target, patch)?.clone();
    ctx.save()?;

    println!("{} {}", "Updated".yellow(), event.date.dimmed());
    println!("   {}", event.render());

    Ok(())
}
