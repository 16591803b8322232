use chrono::{Duration, NaiveDateTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, BookingError, CreateAppointmentRequest};

/// Commit side of booking. Slot lists computed earlier are advisory only: a
/// concurrent client may have taken the slot in the interim, so the store is
/// re-checked for overlap here, at write time, and the insert is refused on
/// conflict.
pub struct BookingService {
    supabase: SupabaseClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn book_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        if request.duration_minutes <= 0 {
            return Err(BookingError::InvalidTime(
                "Duration must be positive".to_string(),
            ));
        }
        let start_time = request.start_time;
        let end_time = start_time + Duration::minutes(request.duration_minutes);

        debug!(
            "Booking professional {} from {} to {}",
            request.professional_id, start_time, end_time
        );

        let conflicts = self
            .get_overlapping_appointments(request.professional_id, start_time, end_time)
            .await?;
        if !conflicts.is_empty() {
            warn!(
                "Slot taken for professional {}: {} overlapping appointments",
                request.professional_id,
                conflicts.len()
            );
            return Err(BookingError::SlotTaken);
        }

        let appointment_data = json!({
            "salon_id": request.salon_id,
            "professional_id": request.professional_id,
            "service_id": request.service_id,
            "client_name": request.client_name,
            "start_time": start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "end_time": end_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "status": "confirmed",
            "created_at": Utc::now().to_rfc3339(),
        });

        let result: Vec<Value> = self
            .supabase
            .insert("/rest/v1/appointments", appointment_data)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Database("Insert returned no row".to_string()))?;

        serde_json::from_value(row)
            .map_err(|e| BookingError::Database(format!("Failed to parse appointment: {}", e)))
    }

    /// Calendar-blocking appointments intersecting `[start_time, end_time)`.
    ///
    /// The store filter is half-open (strict lt/gt), and the overlap is
    /// re-checked here as well so an abutting booking is never reported as a
    /// conflict.
    async fn get_overlapping_appointments(
        &self,
        professional_id: Uuid,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<Appointment>, BookingError> {
        let path = format!(
            "/rest/v1/appointments?professional_id=eq.{}&status=in.(pending,confirmed)&start_time=lt.{}&end_time=gt.{}",
            professional_id,
            end_time.format("%Y-%m-%dT%H:%M:%S"),
            start_time.format("%Y-%m-%dT%H:%M:%S"),
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        let appointments: Vec<Appointment> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|e| BookingError::Database(format!("Failed to parse appointments: {}", e)))?;

        Ok(appointments
            .into_iter()
            .filter(|apt| {
                apt.status.blocks_calendar()
                    && apt.start_time < end_time
                    && apt.end_time > start_time
            })
            .collect())
    }
}
