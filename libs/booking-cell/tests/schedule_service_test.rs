// libs/booking-cell/tests/schedule_service_test.rs
//
// Intake-side tests: raw store rows through the normalizer and the
// availability engine, with the store mocked at the HTTP boundary.

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::models::BookingError;
use booking_cell::services::ScheduleService;
use shared_config::AppConfig;

// ==============================================================================
// FIXTURES
// ==============================================================================

fn test_config(mock_server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: mock_server.uri(),
        supabase_anon_key: "test-key".to_string(),
        slot_granularity_minutes: 30,
    }
}

/// A Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
}

/// Reference instant on a different day, so no elapsed filtering applies.
fn not_today() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn professional_row(id: Uuid, work_hours: Value, break_windows: Value, days_off: Value) -> Value {
    json!({
        "id": id,
        "salon_id": "1febdfb6-e2b1-43ac-8a6c-9f04c519ae21",
        "display_name": "Ana Souza",
        "work_hours": work_hours,
        "break_windows": break_windows,
        "days_off": days_off,
        "is_active": true,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

fn appointment_row(professional_id: Uuid, start: &str, end: &str, status: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "salon_id": "1febdfb6-e2b1-43ac-8a6c-9f04c519ae21",
        "professional_id": professional_id,
        "service_id": null,
        "client_name": "Maria",
        "start_time": start,
        "end_time": end,
        "status": status,
        "created_at": "2025-06-01T00:00:00Z"
    })
}

async fn mount_professional(mock_server: &MockServer, rows: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

async fn mount_appointments(mock_server: &MockServer, rows: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

// ==============================================================================
// TESTS
// ==============================================================================

#[tokio::test]
async fn computes_slots_from_configured_schedule_breaks_and_bookings() {
    let mock_server = MockServer::start().await;
    let professional_id = Uuid::new_v4();

    mount_professional(
        &mock_server,
        vec![professional_row(
            professional_id,
            json!({ "1": { "start": "09:00", "end": "18:00" } }),
            json!([{ "start": "12:00", "end": "13:00" }]),
            json!([]),
        )],
    )
    .await;
    mount_appointments(
        &mock_server,
        vec![appointment_row(
            professional_id,
            "2025-06-16T10:00:00",
            "2025-06-16T10:30:00",
            "confirmed",
        )],
    )
    .await;

    let service = ScheduleService::new(&test_config(&mock_server));
    let slots = service
        .available_slots(professional_id, monday(), 30, not_today())
        .await
        .expect("slots");

    let starts: Vec<String> = slots
        .iter()
        .map(|s| s.start.format("%H:%M").to_string())
        .collect();

    // 18 grid positions minus lunch (2) minus the booking (1).
    assert_eq!(slots.len(), 15);
    assert_eq!(starts[0], "09:00");
    for taken in ["10:00", "12:00", "12:30"] {
        assert!(!starts.contains(&taken.to_string()), "{taken} should be excluded");
    }
    assert!(starts.contains(&"10:30".to_string()));
}

#[tokio::test]
async fn malformed_schedule_blob_falls_back_to_defaults() {
    let mock_server = MockServer::start().await;
    let professional_id = Uuid::new_v4();

    mount_professional(
        &mock_server,
        vec![professional_row(
            professional_id,
            json!("mon-sat 9 to 6"),
            json!(null),
            json!(null),
        )],
    )
    .await;
    mount_appointments(&mock_server, vec![]).await;

    let service = ScheduleService::new(&test_config(&mock_server));
    let slots = service
        .available_slots(professional_id, monday(), 30, not_today())
        .await
        .expect("slots");

    // Default schedule: Mon-Sat 09:00-18:00, no breaks.
    assert_eq!(slots.len(), 18);
    assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
}

#[tokio::test]
async fn day_off_yields_empty_success() {
    let mock_server = MockServer::start().await;
    let professional_id = Uuid::new_v4();

    mount_professional(
        &mock_server,
        vec![professional_row(
            professional_id,
            json!({ "1": { "start": "09:00", "end": "18:00" } }),
            json!([]),
            json!(["2025-06-16"]),
        )],
    )
    .await;
    mount_appointments(&mock_server, vec![]).await;

    let service = ScheduleService::new(&test_config(&mock_server));
    let slots = service
        .available_slots(professional_id, monday(), 30, not_today())
        .await
        .expect("slots");

    assert!(slots.is_empty());
}

#[tokio::test]
async fn unknown_professional_is_an_error() {
    let mock_server = MockServer::start().await;
    mount_professional(&mock_server, vec![]).await;

    let service = ScheduleService::new(&test_config(&mock_server));
    let result = service
        .available_slots(Uuid::new_v4(), monday(), 30, not_today())
        .await;

    assert_matches!(result, Err(BookingError::ProfessionalNotFound));
}

#[tokio::test]
async fn elapsed_slots_are_dropped_when_date_is_today() {
    let mock_server = MockServer::start().await;
    let professional_id = Uuid::new_v4();

    mount_professional(
        &mock_server,
        vec![professional_row(
            professional_id,
            json!({ "1": { "start": "09:00", "end": "18:00" } }),
            json!([]),
            json!([]),
        )],
    )
    .await;
    mount_appointments(&mock_server, vec![]).await;

    let service = ScheduleService::new(&test_config(&mock_server));
    let now = monday().and_hms_opt(12, 5, 0).unwrap();
    let slots = service
        .available_slots(professional_id, monday(), 30, now)
        .await
        .expect("slots");

    assert_eq!(slots[0].start, monday().and_hms_opt(12, 30, 0).unwrap());
    assert_eq!(slots.len(), 11);
}
