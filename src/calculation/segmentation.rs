//! Breakpoint segmentation of a time interval.
//!
//! Classification can only change at a handful of instants: the interval
//! bounds, intervention bounds, on-site slot bounds, the night window bounds
//! (22:00 and 07:00) and midnight (for Sunday detection). This module collects
//! those breakpoints and classifies each resulting segment once, which gives
//! the same result as a minute-by-minute sweep at a cost proportional to the
//! number of breakpoints.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::{ActivityType, Intervention, SubActivityType, TimeSlot, WorkerConfig};

use super::classifier::{
    NIGHT_END_HOUR, NIGHT_START_HOUR, classify_intervention_instant, classify_shift_instant,
    find_intervention,
};

/// A segment of constant classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSegment<'a> {
    /// The start time of this segment.
    pub start: NaiveDateTime,
    /// The end time of this segment.
    pub end: NaiveDateTime,
    /// The classification of every instant in the segment.
    pub sub_activity_type: SubActivityType,
    /// The intervention the segment lies in, if any.
    pub intervention: Option<&'a Intervention>,
}

/// Collects the sorted, de-duplicated instants at which classification may change.
///
/// The result always starts with `start` and ends with `end`; every other
/// element lies strictly between them.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::breakpoints;
/// use shift_pay_engine::models::WorkerConfig;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let config = WorkerConfig::default();
///
/// let points = breakpoints(at("2023-10-26 08:00:00"), at("2023-10-26 20:00:00"), &[], &config.on_site_slots);
/// let times: Vec<String> = points.iter().map(|p| p.format("%H:%M").to_string()).collect();
/// assert_eq!(times, vec!["08:00", "12:00", "14:00", "18:00", "20:00"]);
/// ```
pub fn breakpoints(
    start: NaiveDateTime,
    end: NaiveDateTime,
    interventions: &[Intervention],
    slots: &[TimeSlot],
) -> Vec<NaiveDateTime> {
    let mut points = vec![start, end];

    for intervention in interventions {
        points.push(intervention.start);
        points.push(intervention.end);
    }

    let fixed_times: Vec<NaiveTime> = [0, NIGHT_END_HOUR, NIGHT_START_HOUR]
        .into_iter()
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .chain(slots.iter().flat_map(|slot| [slot.start(), slot.end()]))
        .collect();

    let mut day = start.date();
    while day <= end.date() {
        points.extend(fixed_times.iter().map(|&time| day.and_time(time)));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    points.retain(|&point| point >= start && point <= end);
    points.sort();
    points.dedup();
    points
}

/// Splits `[start, end)` into segments of constant classification.
///
/// Instants inside an intervention are classified from the intervention
/// rules; all others from `activity_type` and the worker's on-site slots.
/// Returns no segments for an empty interval.
pub fn segment_interval<'a>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    activity_type: ActivityType,
    interventions: &'a [Intervention],
    config: &WorkerConfig,
) -> Vec<ShiftSegment<'a>> {
    breakpoints(start, end, interventions, &config.on_site_slots)
        .windows(2)
        .map(|window| {
            let (segment_start, segment_end) = (window[0], window[1]);
            let intervention = find_intervention(segment_start, interventions);
            let sub_activity_type = match intervention {
                Some(_) => classify_intervention_instant(segment_start),
                None => classify_shift_instant(segment_start, activity_type, config),
            };
            ShiftSegment {
                start: segment_start,
                end: segment_end,
                sub_activity_type,
                intervention,
            }
        })
        .collect()
}
