//! Slot enumeration and filtering: the availability engine proper.
//!
//! Pure and synchronous. Every datetime here is salon-local wall-clock time
//! anchored to the target date; all interval comparisons are half-open
//! `[start, end)`, so a booking ending exactly when another starts is not a
//! conflict.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::{
    BookedInterval, BreakWindow, ElapsedSlotPolicy, Slot, SlotGrid, WorkHours,
};

/// Compute the ordered list of bookable slot starts for one professional on
/// one date.
///
/// Returns an empty list when the date is a day off, the weekday is closed,
/// no candidate of `duration_minutes` fits, or the duration is non-positive.
/// An empty day is a valid answer, never an error; this function has no
/// failure modes.
pub fn compute_available_slots(
    date: NaiveDate,
    duration_minutes: i64,
    work_hours: &WorkHours,
    breaks: &[BreakWindow],
    days_off: &[NaiveDate],
    appointments: &[BookedInterval],
    grid: &SlotGrid,
) -> Vec<Slot> {
    if duration_minutes <= 0 || grid.granularity_minutes <= 0 {
        return Vec::new();
    }
    if days_off.contains(&date) {
        return Vec::new();
    }
    let weekday = date.weekday();
    let Some(window) = work_hours.for_weekday(weekday) else {
        return Vec::new();
    };

    let open = date.and_time(window.start);
    let close = date.and_time(window.end);
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(grid.granularity_minutes);

    // Break windows for other weekdays never apply, resolve them up front.
    let day_breaks: Vec<(NaiveDateTime, NaiveDateTime)> = breaks
        .iter()
        .filter(|b| b.applies_on(weekday))
        .map(|b| (date.and_time(b.range.start), date.and_time(b.range.end)))
        .collect();

    let mut slots = Vec::new();
    let mut cursor = open;
    while cursor + duration <= close {
        let end = cursor + duration;

        let elapsed = match grid.elapsed {
            ElapsedSlotPolicy::ExcludeBefore(now) => cursor < now,
            ElapsedSlotPolicy::Include => false,
        };
        let blocked = elapsed
            || end > close // guaranteed by the loop bound, kept as a guard
            || day_breaks
                .iter()
                .any(|&(b_start, b_end)| overlaps(cursor, end, b_start, b_end))
            || appointments
                .iter()
                .any(|apt| overlaps(cursor, end, apt.start, apt.end));

        if !blocked {
            slots.push(Slot { start: cursor, end });
        }
        cursor += step;
    }

    slots
}

/// Half-open interval overlap: `[start1, end1)` intersects `[start2, end2)`.
fn overlaps(
    start1: NaiveDateTime,
    end1: NaiveDateTime,
    start2: NaiveDateTime,
    end2: NaiveDateTime,
) -> bool {
    start1 < end2 && end1 > start2
}
