pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod month;
pub mod status;

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use nova_core::config::NovaConfig;
use nova_core::external::fetch_external;
use nova_core::{
    Event, ExternalCalendar, ExternalWindow, FileStore, LocalEvents, merge_event_sources,
    parse_date,
};

/// Everything a command needs: config, local events and (optionally) the
/// external feed, loaded once per invocation.
pub struct CalendarContext {
    pub config: NovaConfig,
    pub store: FileStore,
    pub local: LocalEvents,
    pub external: ExternalCalendar,
    pub today: NaiveDate,
}

impl CalendarContext {
    /// Load config, local events and the external feed.
    pub async fn load() -> Result<Self> {
        let mut ctx = Self::local_only()?;

        let window = ExternalWindow::starting(ctx.today, ctx.config.external_window_days);
        ctx.external = fetch_external(
            ctx.config.external_calendar.as_deref(),
            window,
            ctx.config.external_color,
        )
        .await;

        tracing::debug!(
            local = ctx.local.len(),
            external = ctx.external.events.len(),
            connected = ctx.external.connected,
            "loaded calendar context"
        );
        Ok(ctx)
    }

    /// Load config and local events without touching the external feed.
    pub fn local_only() -> Result<Self> {
        let config = NovaConfig::load()?;
        Self::from_config(config, Local::now().date_naive())
    }

    fn from_config(config: NovaConfig, today: NaiveDate) -> Result<Self> {
        let store = config.store();
        let local = LocalEvents::load(&store, &config.events_key())
            .with_context(|| format!("Failed to load events from {}", store.dir().display()))?;

        Ok(CalendarContext {
            config,
            store,
            local,
            external: ExternalCalendar::disconnected(),
            today,
        })
    }

    /// Local events followed by external ones.
    pub fn merged(&self) -> Vec<Event> {
        merge_event_sources(self.local.as_slice(), &self.external.events)
    }

    pub fn save(&self) -> Result<()> {
        self.local
            .save(&self.store, &self.config.events_key())
            .context("Failed to save local events")
    }

    /// Find an event by id, local events first.
    pub fn resolve(&self, id: &str) -> Result<Event> {
        self.merged()
            .into_iter()
            .find(|e| e.id == id)
            .with_context(|| format!("No event with id '{}'", id))
    }
}

/// Parse a day argument: `today`, `tomorrow`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_day(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let day = match s.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        other => parse_date(other),
    };

    day.with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}
