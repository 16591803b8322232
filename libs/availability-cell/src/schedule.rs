//! Normalization of loosely-typed persisted schedule fields.
//!
//! Professionals' work hours, breaks and days off are stored as opaque JSON
//! blobs and may be missing, legacy-shaped or plain broken. The parsers here
//! degrade instead of failing: unusable work hours become `None` (caller
//! substitutes the configured defaults), unusable list entries are dropped
//! individually. Booking must never be blocked by a malformed schedule row.

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use tracing::debug;

use crate::models::{BreakWindow, TimeRange, WorkHours};

/// Parse a persisted work-hours blob.
///
/// Accepted shapes:
/// - a mapping from weekday index (`"0"` = Sunday .. `"6"` = Saturday) to
///   either `null` (closed) or `{"start": .., "end": ..}`;
/// - the same mapping wrapped in a versioned envelope
///   `{"version": 1, "days": {..}}`.
///
/// Interval endpoints are `"HH:MM"` / `"HH:MM:SS"` strings or
/// minutes-since-midnight numbers. Any malformed day entry invalidates the
/// whole value: the result is `None` and the caller falls back to defaults.
pub fn parse_work_hours(raw: &Value) -> Option<WorkHours> {
    let obj = raw.as_object()?;
    let days_obj = match obj.get("days") {
        Some(days) => days.as_object()?,
        None => obj,
    };

    let mut days: [Option<TimeRange>; 7] = [None; 7];
    for (key, value) in days_obj {
        if key == "version" {
            continue;
        }
        let index: usize = match key.parse() {
            Ok(i) if i < 7 => i,
            _ => {
                debug!("work hours: ignoring unknown weekday key {:?}", key);
                continue;
            }
        };
        if value.is_null() {
            continue; // explicitly closed
        }
        days[index] = Some(parse_range(value)?);
    }

    Some(WorkHours::from_days(days))
}

/// Parse a persisted breaks blob: a list of `{weekday?, start, end}`
/// descriptors. A missing or `null` weekday means the break recurs every
/// day. Malformed entries are dropped; a non-list value yields `None`.
pub fn parse_breaks(raw: &Value) -> Option<Vec<BreakWindow>> {
    let entries = raw.as_array()?;

    let mut breaks = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_break(entry) {
            Some(window) => breaks.push(window),
            None => debug!("breaks: dropping malformed entry {}", entry),
        }
    }
    Some(breaks)
}

/// Parse a persisted days-off blob: a list of `YYYY-MM-DD` date strings.
/// Datetime strings are truncated to their date part; malformed entries are
/// dropped; a non-list value yields `None`.
pub fn parse_days_off(raw: &Value) -> Option<Vec<NaiveDate>> {
    let entries = raw.as_array()?;

    let mut days_off = Vec::with_capacity(entries.len());
    for entry in entries {
        let parsed = entry
            .as_str()
            .and_then(|s| s.get(..10))
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        match parsed {
            Some(date) => days_off.push(date),
            None => debug!("days off: dropping malformed entry {}", entry),
        }
    }
    Some(days_off)
}

fn parse_break(entry: &Value) -> Option<BreakWindow> {
    let obj = entry.as_object()?;

    let weekday = match obj.get("weekday") {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_u64() {
            Some(day) if day < 7 => Some(day as u8),
            _ => return None,
        },
    };

    let range = parse_range(entry)?;
    Some(BreakWindow { weekday, range })
}

fn parse_range(value: &Value) -> Option<TimeRange> {
    let start = parse_clock(value.get("start")?)?;
    let end = parse_clock(value.get("end")?)?;
    TimeRange::new(start, end)
}

fn parse_clock(value: &Value) -> Option<NaiveTime> {
    match value {
        Value::String(s) => NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok(),
        Value::Number(n) => {
            let minutes = n.as_u64()?;
            NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(minutes).ok()? * 60, 0)
        }
        _ => None,
    }
}
