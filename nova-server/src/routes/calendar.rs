//! Month grid and event endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use nova_core::{
    DayCell, Event, EventColor, EventPatch, LocalEvents, NewEvent, NovaError, ReferenceMonth,
    build_month_grid_with, events_on_date, merge_event_sources, parse_date, sort_by_time,
};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grid", get(month_grid))
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .route("/status", get(status))
}

#[derive(Deserialize)]
pub struct GridQuery {
    pub year: Option<i32>,
    /// Zero-based; values outside 0..12 roll into neighbouring years
    pub month: Option<i32>,
    pub selected: Option<String>,
}

#[derive(Serialize)]
pub struct GridResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub cells: Vec<DayCell>,
}

/// GET /grid - Day cells for one month
async fn month_grid(
    State(state): State<AppState>,
    Query(params): Query<GridQuery>,
) -> Result<Json<GridResponse>, AppError> {
    let today = state.today();
    let selected = match params.selected.as_deref() {
        Some(s) => parse_day(s)?,
        None => today,
    };

    let month = match (params.year, params.month) {
        (Some(year), Some(month)) => ReferenceMonth::new(year, month),
        (None, None) => ReferenceMonth::containing(selected),
        _ => {
            return Err(AppError::BadRequest(
                "year and month must be given together".to_string(),
            ));
        }
    }
    .ok_or_else(|| AppError::BadRequest("month is out of range".to_string()))?;

    let events = merged_events(&state).await?;
    let cells = build_month_grid_with(
        state.config.grid_options(),
        month,
        today,
        selected,
        &events,
    );

    Ok(Json(GridResponse {
        year: month.year(),
        month: month.month_index(),
        label: month.label(),
        cells,
    }))
}

#[derive(Deserialize)]
pub struct EventsQuery {
    pub date: Option<String>,
}

/// GET /events - Merged events on one day (default today), sorted by time
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let date = match params.date.as_deref() {
        Some(s) => parse_day(s)?,
        None => state.today(),
    };

    let events = merged_events(&state).await?;
    let mut day_events = events_on_date(date, &events);
    sort_by_time(&mut day_events);

    Ok(Json(day_events.into_iter().cloned().collect()))
}

/// Request body for creating an event
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    /// `YYYY-MM-DD`; tomorrow when omitted
    pub date: Option<String>,
    pub time: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// POST /events - Create a local event
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let today = state.today();
    let date = match req.date.as_deref() {
        Some(s) => parse_day(s)?,
        None => today.checked_add_days(Days::new(1)).unwrap_or(today),
    };

    let new_event = NewEvent {
        title: req.title,
        date,
        time: req.time,
        color: parse_color(req.color.as_deref())?,
        location: req.location,
        description: req.description,
    };

    let event = state
        .modify_local(|local| local.create(new_event, Utc::now()).cloned())
        .await?;

    tracing::info!(id = %event.id, date = %event.date, "created event");
    Ok((StatusCode::CREATED, Json(event)))
}

/// Request body for updating an event. Empty `time`, `location` or
/// `description` clears the field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// PUT /events/:id - Update a local event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let patch = EventPatch {
        title: req.title,
        date: req.date.as_deref().map(parse_day).transpose()?,
        time: req.time,
        color: parse_color(req.color.as_deref())?,
        location: req.location,
        description: req.description,
    };

    let external = external_event(&state, &id).await;
    let event = state
        .modify_local(|local| {
            let target = resolve_target(local, external, &id)?;
            local.update(&target, patch).cloned()
        })
        .await?;

    tracing::info!(id = %event.id, "updated event");
    Ok(Json(event))
}

/// DELETE /events/:id - Delete a local event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let external = external_event(&state, &id).await;
    let removed = state
        .modify_local(|local| {
            let target = resolve_target(local, external, &id)?;
            local.remove(&target)
        })
        .await?;

    tracing::info!(id = %removed.id, "deleted event");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub connected: bool,
    pub local_events: usize,
    pub external_events: usize,
}

/// GET /status - Event counts and external calendar connection
async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let local = state.load_local()?;
    let external = state.external.read().await;

    Ok(Json(StatusResponse {
        connected: external.connected,
        local_events: local.len(),
        external_events: external.events.len(),
    }))
}

async fn merged_events(state: &AppState) -> Result<Vec<Event>, AppError> {
    let local = state.load_local()?;
    let external = state.external.read().await;
    Ok(merge_event_sources(local.as_slice(), &external.events))
}

async fn external_event(state: &AppState, id: &str) -> Option<Event> {
    let external = state.external.read().await;
    external.events.iter().find(|e| e.id == id).cloned()
}

/// Local events win over an external event with the same id.
fn resolve_target(
    local: &LocalEvents,
    external: Option<Event>,
    id: &str,
) -> Result<Event, NovaError> {
    local
        .find(id)
        .cloned()
        .or(external)
        .ok_or_else(|| NovaError::EventNotFound(id.to_string()))
}

fn parse_day(s: &str) -> Result<NaiveDate, AppError> {
    parse_date(s).ok_or_else(|| {
        AppError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", s))
    })
}

fn parse_color(s: Option<&str>) -> Result<Option<EventColor>, AppError> {
    Ok(s.map(str::parse::<EventColor>).transpose()?)
}
