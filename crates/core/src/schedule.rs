//! Weekly class schedule helpers.
//!
//! Sessions store `day_of_week` as 0 = Monday .. 6 = Sunday, matching
//! `chrono::Weekday::num_days_from_monday`.

use serde::Serialize;

/// Display names indexed by `day_of_week`.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One day of the schedule with its sessions in start-time order.
#[derive(Debug, Serialize)]
pub struct ScheduleDay<T: Serialize> {
    pub day_of_week: i16,
    pub day_name: &'static str,
    pub sessions: Vec<T>,
}

/// Group sessions by weekday, Monday first, omitting empty days.
///
/// Input order within a day is preserved, so callers sort by start time
/// first. Sessions with an out-of-range weekday are dropped.
pub fn group_by_weekday<T, F>(sessions: Vec<T>, day_of: F) -> Vec<ScheduleDay<T>>
where
    T: Serialize,
    F: Fn(&T) -> i16,
{
    let mut days: Vec<ScheduleDay<T>> = (0..7)
        .map(|d| ScheduleDay {
            day_of_week: d as i16,
            day_name: WEEKDAY_NAMES[d],
            sessions: Vec::new(),
        })
        .collect();

    for session in sessions {
        let day = day_of(&session);
        match usize::try_from(day).ok().and_then(|d| days.get_mut(d)) {
            Some(slot) => slot.sessions.push(session),
            None => tracing::warn!(day_of_week = day, "Class session has invalid weekday"),
        }
    }

    days.retain(|d| !d.sessions.is_empty());
    days
}
