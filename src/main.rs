mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nova_core::EventColor;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nova")]
#[command(about = "Month grid, day agenda and local events for your Nova calendar")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid and the selected day's events
    Month {
        /// Month to show (YYYY-MM), defaults to the selected day's month
        #[arg(short, long)]
        month: Option<String>,

        /// Selected day (YYYY-MM-DD, "today", "tomorrow"), defaults to today
        #[arg(short, long)]
        select: Option<String>,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the events on one day
    Day {
        /// YYYY-MM-DD, "today", "tomorrow" or "yesterday"
        date: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a local event (tomorrow unless --date is given)
    Add {
        title: String,

        #[arg(short, long)]
        date: Option<String>,

        /// Start time, e.g. "15:00" or "3pm". Omit for an all-day event
        #[arg(short, long)]
        time: Option<String>,

        /// blue, green, purple or red
        #[arg(short, long)]
        color: Option<EventColor>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Change a local event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        /// New start time; pass "" to make the event all-day
        #[arg(short, long)]
        time: Option<String>,

        #[arg(short, long)]
        color: Option<EventColor>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a local event
    Delete { id: String },
    /// Event counts and external calendar connection
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config and data paths
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Month {
            month,
            select,
            json,
        } => {
            let ctx = commands::CalendarContext::load().await?;
            commands::month::run(&ctx, month.as_deref(), select.as_deref(), json)
        }
        Commands::Day { date, json } => {
            let ctx = commands::CalendarContext::load().await?;
            commands::day::run(&ctx, date.as_deref(), json)
        }
        Commands::Add {
            title,
            date,
            time,
            color,
            location,
            description,
        } => {
            let mut ctx = commands::CalendarContext::local_only()?;
            let args = commands::add::AddArgs {
                title,
                date,
                time,
                color,
                location,
                description,
            };
            commands::add::run(&mut ctx, args)
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            color,
            location,
            description,
        } => {
            let mut ctx = commands::CalendarContext::load().await?;
            let args = commands::edit::EditArgs {
                title,
                date,
                time,
                color,
                location,
                description,
            };
            commands::edit::run(&mut ctx, &id, args)
        }
        Commands::Delete { id } => {
            let mut ctx = commands::CalendarContext::load().await?;
            commands::delete::run(&mut ctx, &id)
        }
        Commands::Status { json } => {
            let ctx = commands::CalendarContext::load().await?;
            commands::status::run(&ctx, json)
        }
        Commands::Config { command } => match command {
            ConfigCommand::Init { force } => commands::config::init(force),
            ConfigCommand::Path => commands::config::path(),
        },
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            format!("{}=debug,nova_core=debug", env!("CARGO_CRATE_NAME")).into()
        } else {
            "warn".into()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
