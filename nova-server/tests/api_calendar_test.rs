//! Integration tests for the calendar API endpoints

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Days, Local};
use nova_core::config::NovaConfig;
use nova_core::{Event, EventColor, EventSource, ExternalCalendar, KvStore, MemoryStore};
use nova_server::{AppState, app};
use serde_json::Value;
use tower::util::ServiceExt;

fn external_event(id: &str, date: &str) -> Event {
    Event {
        id: id.to_string(),
        title: "Board meeting".to_string(),
        date: date.to_string(),
        time: Some("10:00".to_string()),
        end_time: Some("11:00".to_string()),
        color: Some(EventColor::Purple),
        source: EventSource::External,
        location: None,
        description: None,
    }
}

fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(NovaConfig::default(), store.clone());
    (state, store)
}

async fn test_app_with_external(events: Vec<Event>) -> (Router, AppState, Arc<MemoryStore>) {
    let (state, store) = test_state();
    state
        .set_external(ExternalCalendar {
            connected: true,
            events,
        })
        .await;
    (app(state.clone()), state, store)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/calendar/events", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// February 2024 renders as five full weeks
#[tokio::test]
async fn it_returns_month_grid() {
    let (app, _, _) = test_app_with_external(vec![]).await;

    let response = app
        .oneshot(get("/api/calendar/grid?year=2024&month=1&selected=2024-02-14"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 1);
    assert_eq!(body["label"], "February 2024");

    let cells = body["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 35);
    assert_eq!(cells[0]["dayNumber"], 28);
    assert_eq!(cells[0]["isOtherMonth"], true);
    assert_eq!(cells[4]["date"], "2024-02-01");
    assert_eq!(cells[17]["isSelected"], true);
    assert_eq!(cells[34]["dayNumber"], 2);
}

/// Month indexes outside 0..12 roll into the neighbouring year
#[tokio::test]
async fn it_normalizes_month_index() {
    let (app, _, _) = test_app_with_external(vec![]).await;

    let response = app
        .oneshot(get("/api/calendar/grid?year=2024&month=-1"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["year"], 2023);
    assert_eq!(body["month"], 11);
}

#[tokio::test]
async fn it_rejects_half_specified_month() {
    let (app, _, _) = test_app_with_external(vec![]).await;

    let response = app
        .oneshot(get("/api/calendar/grid?year=2024"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// External events show up as dots next to local ones
#[tokio::test]
async fn it_marks_event_dots_from_both_sources() {
    let (app, _, _) =
        test_app_with_external(vec![external_event("ext-1", "2024-02-29")]).await;
    create(
        &app,
        serde_json::json!({ "title": "Leap day", "date": "2024-02-29", "color": "green" }),
    )
    .await;

    let response = app
        .oneshot(get("/api/calendar/grid?year=2024&month=1"))
        .await
        .unwrap();

    let body = body_json(response).await;
    let leap_day = body["cells"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["date"] == "2024-02-29")
        .unwrap();
    assert_eq!(leap_day["eventDots"], serde_json::json!(["green", "purple"]));
}

#[tokio::test]
async fn it_lists_day_events_sorted() {
    let (app, _, _) =
        test_app_with_external(vec![external_event("ext-1", "2024-02-29")]).await;
    create(
        &app,
        serde_json::json!({ "title": "Dinner", "date": "2024-02-29", "time": "7:00 PM" }),
    )
    .await;
    create(&app, serde_json::json!({ "title": "Holiday", "date": "2024-02-29" })).await;
    create(&app, serde_json::json!({ "title": "Other day", "date": "2024-03-01" })).await;

    let response = app
        .oneshot(get("/api/calendar/events?date=2024-02-29"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Holiday", "Board meeting", "Dinner"]);
}

#[tokio::test]
async fn it_rejects_invalid_date_query() {
    let (app, _, _) = test_app_with_external(vec![]).await;

    let response = app
        .oneshot(get("/api/calendar/events?date=2024-02-30"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Quick-add without a date lands on tomorrow and is persisted
#[tokio::test]
async fn it_creates_event_for_tomorrow_by_default() {
    let (app, state, store) = test_app_with_external(vec![]).await;

    let body = create(&app, serde_json::json!({ "title": "Call mom" })).await;

    let tomorrow = Local::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap();
    assert_eq!(body["date"], tomorrow.format("%Y-%m-%d").to_string());
    assert_eq!(body["source"], "local");

    let stored = store.get(&state.config.events_key()).unwrap().unwrap();
    assert!(stored.contains("Call mom"));
}

#[tokio::test]
async fn it_rejects_blank_title_and_unknown_color() {
    let (app, _, store) = test_app_with_external(vec![]).await;

    let blank = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/calendar/events",
            serde_json::json!({ "title": "  ", "date": "2024-02-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let bad_color = app
        .oneshot(json_request(
            "POST",
            "/api/calendar/events",
            serde_json::json!({ "title": "Lunch", "color": "orange" }),
        ))
        .await
        .unwrap();
    assert_eq!(bad_color.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store.get("nova-events").unwrap(), None);
}

#[tokio::test]
async fn it_updates_local_event() {
    let (app, _, _) = test_app_with_external(vec![]).await;
    let created = create(
        &app,
        serde_json::json!({ "title": "Lunch", "date": "2024-02-01", "time": "12:00" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/calendar/events/{}", id),
            serde_json::json!({ "date": "2024-02-02", "time": "", "color": "red" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-02-02");
    assert_eq!(body["color"], "red");
    assert!(body.get("time").is_none());
    assert_eq!(body["title"], "Lunch");
}

#[tokio::test]
async fn it_deletes_local_event() {
    let (app, _, _) = test_app_with_external(vec![]).await;
    let created = create(
        &app,
        serde_json::json!({ "title": "Lunch", "date": "2024-02-01" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/calendar/events/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let events = body_json(
        app.oneshot(get("/api/calendar/events?date=2024-02-01"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(events, serde_json::json!([]));
}

/// External events are read-only through the API
#[tokio::test]
async fn it_forbids_changing_external_events() {
    let (app, _, store) =
        test_app_with_external(vec![external_event("ext-1", "2024-02-10")]).await;

    let update = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/calendar/events/ext-1",
            serde_json::json!({ "title": "Hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::FORBIDDEN);

    let delete = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/calendar/events/ext-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    assert_eq!(store.get("nova-events").unwrap(), None);
}

#[tokio::test]
async fn it_returns_404_for_unknown_event() {
    let (app, _, _) = test_app_with_external(vec![]).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/calendar/events/12345")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("12345"));
}

#[tokio::test]
async fn it_reports_status() {
    let (app, _, _) = test_app_with_external(vec![
        external_event("ext-1", "2024-02-10"),
        external_event("ext-2", "2024-02-11"),
    ])
    .await;
    create(&app, serde_json::json!({ "title": "Lunch" })).await;

    let response = app.oneshot(get("/api/calendar/status")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({ "connected": true, "local_events": 1, "external_events": 2 })
    );
}

/// With no feed configured the server reports a disconnected calendar
#[tokio::test]
async fn it_reports_disconnected_without_feed() {
    let (state, _) = test_state();
    nova_server::refresh::refresh_external(&state).await;

    let response = app(state)
        .oneshot(get("/api/calendar/status"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["connected"], false);
    assert_eq!(body["external_events"], 0);
}

/// Loose stored records (no id, no date, tagged external) still load and
/// stay editable
#[tokio::test]
async fn it_serves_loose_stored_records() {
    let (app, state, store) = test_app_with_external(vec![]).await;
    store
        .put(
            &state.config.events_key(),
            r#"[{"id":"7","title":"Imported","date":"2024-03-01","source":"external"},
                {"title":"Meeting","date":"2024-03-01","time":"","color":"blue"},
                {"id":2,"title":"Undated"}]"#,
        )
        .unwrap();

    let status = body_json(
        app.clone()
            .oneshot(get("/api/calendar/status"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status["local_events"], 3);

    let day = body_json(
        app.clone()
            .oneshot(get("/api/calendar/events?date=2024-03-01"))
            .await
            .unwrap(),
    )
    .await;
    let day = day.as_array().unwrap();
    assert_eq!(day.len(), 2);
    assert!(day.iter().all(|e| e["source"] == "local"));

    let update = app
        .oneshot(json_request(
            "PUT",
            "/api/calendar/events/7",
            serde_json::json!({ "title": "Renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::OK);
}
