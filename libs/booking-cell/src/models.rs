// libs/booking-cell/src/models.rs
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use shared_models::error::AppError;

// ==============================================================================
// STORE ROWS
// ==============================================================================

/// A salon professional as persisted. The schedule columns are loosely-typed
/// JSON blobs from legacy writers; only the availability normalizer is
/// allowed to interpret them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub display_name: String,
    pub work_hours: Option<Value>,
    pub break_windows: Option<Value>,
    pub days_off: Option<Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A committed appointment row. Times are salon-local wall-clock
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Option<Uuid>,
    pub client_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Whether this appointment still occupies calendar time.
    pub fn blocks_calendar(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

// ==============================================================================
// REQUEST / RESPONSE DTOS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub salon_id: Uuid,
    pub professional_id: Uuid,
    pub service_id: Option<Uuid>,
    pub client_name: String,
    pub start_time: NaiveDateTime,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub professional_id: Uuid,
    pub date: chrono::NaiveDate,
    pub slots: Vec<String>,
    pub total: usize,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Professional not found")]
    ProfessionalNotFound,

    #[error("Slot no longer available")]
    SlotTaken,

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::ProfessionalNotFound => AppError::NotFound(err.to_string()),
            BookingError::SlotTaken => AppError::Conflict(err.to_string()),
            BookingError::InvalidTime(msg) => AppError::Validation(msg),
            BookingError::Database(msg) => AppError::Database(msg),
        }
    }
}
