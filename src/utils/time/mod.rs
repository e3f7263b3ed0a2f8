// Time utility functions
// Slot and weekday helpers for the weekly grid

use chrono::{NaiveTime, Weekday};

use crate::models::grid::{SLOTS_PER_DAY, SLOT_MINUTES};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Day index 0 is Monday.
pub fn weekday(day: usize) -> Weekday {
    WEEKDAYS[day % WEEKDAYS.len()]
}

pub fn weekday_label(day: usize) -> String {
    weekday(day).to_string()
}

/// Start time of a fine slot. Slot 288 is treated as end of day (00:00).
pub fn slot_start_time(slot: usize) -> NaiveTime {
    let minutes = (slot % SLOTS_PER_DAY) as u32 * SLOT_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// `"08:00–08:15"` for a block of `len` slots starting at `slot`.
pub fn slot_range_label(slot: usize, len: usize) -> String {
    let start = slot_start_time(slot);
    let end = slot_start_time(slot + len);
    format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))
}

/// `"1h 30m"`, `"2h"`, `"45m"`, `"0m"`.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
