use anyhow::Result;
use owo_colors::OwoColorize;

use super::CalendarContext;

pub fn run(ctx: &mut CalendarContext, id: &str) -> Result<()> {
    let target = ctx.resolve(id)?;
    let removed = ctx.local.remove(&target)?;
    ctx.save()?;

    println!("{} {} {}", "Deleted".red(), removed.title, removed.date.dimmed());

    Ok(())
}
