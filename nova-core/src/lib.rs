//! Core types for the Nova calendar.
//!
//! This crate provides everything the CLI and the HTTP server share:
//! - `event` and `date` for the event model and month navigation
//! - `grid` and `query` for month grid generation and per-day lookups
//! - `local`, `store` for the user's own events and their persistence
//! - `external`, `ics` for read-only events from a third-party feed
//! - `config` for `~/.config/nova/config.toml`

pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod external;
pub mod grid;
pub mod ics;
pub mod local;
pub mod query;
pub mod store;

pub use date::{ReferenceMonth, format_date, parse_date};
pub use error::{NovaError, NovaResult};
pub use event::{Event, EventColor, EventPatch, EventSource, NewEvent};
pub use external::{ExternalCalendar, ExternalWindow};
pub use grid::{DayCell, GridOptions, build_month_grid, build_month_grid_with};
pub use local::LocalEvents;
pub use query::{events_on_date, merge_event_sources, sort_by_time};
pub use store::{FileStore, KvStore, MemoryStore};
