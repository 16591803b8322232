use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use availability_cell::{
    compute_available_slots, parse_breaks, parse_days_off, parse_work_hours,
    AvailabilityDefaults, BookedInterval, Slot, SlotGrid,
};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, BookingError, Professional};

/// Intake side of booking: fetches one professional's raw schedule and the
/// day's committed appointments, normalizes, and runs the availability
/// engine. All store access happens here; the engine itself stays pure.
pub struct ScheduleService {
    supabase: SupabaseClient,
    defaults: AvailabilityDefaults,
    granularity_minutes: i64,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_defaults(config, AvailabilityDefaults::default())
    }

    /// Override the fallback schedule, e.g. per tenant.
    pub fn with_defaults(config: &AppConfig, defaults: AvailabilityDefaults) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            defaults,
            granularity_minutes: config.slot_granularity_minutes,
        }
    }

    /// Compute the bookable slots for one professional on one date.
    ///
    /// `now` is the salon-local current instant supplied by the caller.
    /// Policy, applied identically at every entry point: when `date` is
    /// today, slot starts that have already elapsed are excluded.
    pub async fn available_slots(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
        duration_minutes: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<Slot>, BookingError> {
        debug!(
            "Computing slots for professional {} on {} ({} min)",
            professional_id, date, duration_minutes
        );

        let professional = self.get_professional(professional_id).await?;

        let work_hours = professional
            .work_hours
            .as_ref()
            .and_then(parse_work_hours)
            .unwrap_or_else(|| self.defaults.work_hours.clone());
        let breaks = professional
            .break_windows
            .as_ref()
            .and_then(parse_breaks)
            .unwrap_or_else(|| self.defaults.breaks.clone());
        let days_off = professional
            .days_off
            .as_ref()
            .and_then(parse_days_off)
            .unwrap_or_default();

        let appointments = self.get_booked_intervals(professional_id, date).await?;

        let mut grid = SlotGrid::with_granularity(self.granularity_minutes);
        if date == now.date() {
            grid = grid.excluding_before(now);
        }

        let slots = compute_available_slots(
            date,
            duration_minutes,
            &work_hours,
            &breaks,
            &days_off,
            &appointments,
            &grid,
        );

        debug!("Found {} available slots", slots.len());
        Ok(slots)
    }

    async fn get_professional(&self, professional_id: Uuid) -> Result<Professional, BookingError> {
        let path = format!(
            "/rest/v1/professionals?id=eq.{}&is_active=eq.true",
            professional_id
        );
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Database(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or(BookingError::ProfessionalNotFound)?;

        serde_json::from_value(row)
            .map_err(|e| BookingError::Database(format!("Failed to parse professional: {}", e)))
    }

    /// Committed (calendar-blocking) appointments starting on `date`.
    async fn get_booked_intervals(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<BookedInterval>, BookingError> {
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let next_day = day_start + chrono::Duration::days(1);

        let path = format!(
            "/rest/v1/appointments?professional_id=eq.{}&status=in.(pending,confirmed)&start_time=gte.{}&start_time=lt.{}&order=start_time.asc",
            professional_id,
            day_start.format("%Y-%m-%dT%H:%M:%S"),
            next_day.format("%Y-%m-%dT%H:%M:%S"),
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
            .iter()
            .filter(|apt| apt.status.blocks_calendar())
            .map(|apt| BookedInterval {
                start: apt.start_time,
                end: apt.end_time,
            })
            .collect())
    }
}
