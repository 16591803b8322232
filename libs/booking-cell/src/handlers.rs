use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateAppointmentRequest, DaySlotsResponse};
use crate::services::{BookingService, ScheduleService};

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
    pub duration_minutes: i64,
}

fn validate_duration(duration_minutes: i64) -> Result<(), AppError> {
    if duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Availability API: ordered bookable start times for one professional on
/// one date. An empty day is a successful, empty answer.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<DaySlotsResponse>, AppError> {
    validate_duration(query.duration_minutes)?;

    let schedule_service = ScheduleService::new(&state);
    let slots = schedule_service
        .available_slots(
            professional_id,
            query.date,
            query.duration_minutes,
            Local::now().naive_local(),
        )
        .await?;

    Ok(Json(DaySlotsResponse {
        professional_id,
        date: query.date,
        total: slots.len(),
        slots: slots
            .iter()
            .map(|slot| slot.start.format("%H:%M").to_string())
            .collect(),
    }))
}

/// Public booking-widget entry point. Same ordered local times as the
/// availability API, under the widget's `horarios` key.
#[axum::debug_handler]
pub async fn get_widget_horarios(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    validate_duration(query.duration_minutes)?;

    let schedule_service = ScheduleService::new(&state);
    let slots = schedule_service
        .available_slots(
            professional_id,
            query.date,
            query.duration_minutes,
            Local::now().naive_local(),
        )
        .await?;

    let horarios: Vec<String> = slots
        .iter()
        .map(|slot| slot.start.format("%H:%M").to_string())
        .collect();

    Ok(Json(json!({
        "data": query.date,
        "horarios": horarios,
    })))
}

/// Booking commit: re-checks overlap against the store at write time and
/// answers 409 when the slot was taken since the client saw it.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    validate_duration(request.duration_minutes)?;
    if request.client_name.trim().is_empty() {
        return Err(AppError::Validation("client_name is required".to_string()));
    }

    let booking_service = BookingService::new(&state);
    let appointment = booking_service.book_appointment(request).await?;

    Ok(Json(json!(appointment)))
}
