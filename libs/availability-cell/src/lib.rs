pub mod models;
pub mod schedule;
pub mod slots;

pub use models::{
    AvailabilityDefaults, BookedInterval, BreakWindow, ElapsedSlotPolicy, Slot, SlotGrid,
    TimeRange, WorkHours,
};
pub use schedule::{parse_breaks, parse_days_off, parse_work_hours};
pub use slots::compute_available_slots;
