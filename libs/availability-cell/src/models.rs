use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A wall-clock interval within a single day. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

/// Recurring weekly opening hours for one professional.
///
/// Days are indexed 0 = Sunday .. 6 = Saturday; a `None` entry means the
/// professional does not work that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    days: [Option<TimeRange>; 7],
}

impl WorkHours {
    pub fn from_days(days: [Option<TimeRange>; 7]) -> Self {
        Self { days }
    }

    pub fn closed() -> Self {
        Self { days: [None; 7] }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<TimeRange> {
        self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn is_open(&self, weekday: Weekday) -> bool {
        self.for_weekday(weekday).is_some()
    }
}

/// A recurring unavailable interval (e.g. lunch).
///
/// `weekday` scopes the break to one day of the week (0 = Sunday); `None`
/// means the break recurs every working day. Breaks need not be sorted or
/// disjoint; exclusion treats the union of all applicable intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub weekday: Option<u8>,
    pub range: TimeRange,
}

impl BreakWindow {
    pub fn daily(range: TimeRange) -> Self {
        Self {
            weekday: None,
            range,
        }
    }

    pub fn on_weekday(weekday: u8, range: TimeRange) -> Self {
        Self {
            weekday: Some(weekday),
            range,
        }
    }

    pub fn applies_on(&self, weekday: Weekday) -> bool {
        match self.weekday {
            Some(day) => u32::from(day) == weekday.num_days_from_sunday(),
            None => true,
        }
    }
}

/// An already-committed booking occupying the professional's calendar.
/// Only the interval matters here; compared half-open as `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A bookable slot: guaranteed by construction to fit inside the working
/// window, avoid every applicable break, and overlap no existing booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Policy for slot starts that have already elapsed when the target date is
/// "today". Callers pass the reference instant explicitly so the engine
/// stays pure; every entry point must pick one policy and stick to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedSlotPolicy {
    /// Keep candidates regardless of the current time of day.
    Include,
    /// Drop candidates starting before the given instant.
    ExcludeBefore(NaiveDateTime),
}

/// Enumeration parameters for the slot grid.
///
/// The granularity is the step used to walk the working window; it is
/// independent of the service duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub granularity_minutes: i64,
    pub elapsed: ElapsedSlotPolicy,
}

pub const DEFAULT_GRANULARITY_MINUTES: i64 = 30;

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            elapsed: ElapsedSlotPolicy::Include,
        }
    }
}

impl SlotGrid {
    pub fn with_granularity(granularity_minutes: i64) -> Self {
        Self {
            granularity_minutes,
            ..Self::default()
        }
    }

    pub fn excluding_before(mut self, now: NaiveDateTime) -> Self {
        self.elapsed = ElapsedSlotPolicy::ExcludeBefore(now);
        self
    }
}

/// Fallback schedule used whenever a professional has no parseable
/// configuration. An explicit value owned by the caller, not a hidden
/// module-level constant, so deployments can override it per tenant.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityDefaults {
    pub work_hours: WorkHours,
    pub breaks: Vec<BreakWindow>,
}

impl Default for AvailabilityDefaults {
    /// Mon-Sat 09:00-18:00, Sunday closed, no breaks.
    fn default() -> Self {
        let open = TimeRange {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        let mut days = [Some(open); 7];
        days[0] = None;
        Self {
            work_hours: WorkHours::from_days(days),
            breaks: Vec::new(),
        }
    }
}
