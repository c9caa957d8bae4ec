//! Shift classification logic.
//!
//! This module maps a point in time to the [`SubActivityType`] it is paid at.
//! Classification is evaluated in a fixed precedence order:
//!
//! 1. Inside an intervention: night intervention between 22:00 and 07:00,
//!    otherwise Sunday/holiday intervention on a Sunday, otherwise a plain
//!    intervention. Night wins over Sunday.
//! 2. Standby activity: standby at home.
//! 3. Training activity: training.
//! 4. Guard activity: on-site guard inside a configured on-site slot,
//!    standby on site outside.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::models::{Activity, ActivityType, Intervention, SubActivityType, WorkerConfig};

/// Hour at which the night window opens.
pub const NIGHT_START_HOUR: u32 = 22;

/// Hour at which the night window closes.
pub const NIGHT_END_HOUR: u32 = 7;

/// Returns true if the instant falls in the night window `[22:00, 07:00)`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::is_night;
/// use chrono::NaiveDateTime;
///
/// let late = NaiveDateTime::parse_from_str("2023-10-28 23:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let morning = NaiveDateTime::parse_from_str("2023-10-29 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert!(is_night(late));
/// assert!(!is_night(morning));
/// ```
pub fn is_night(instant: NaiveDateTime) -> bool {
    let hour = instant.hour();
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Returns true if the instant falls on a Sunday or public holiday.
///
/// Only Sundays are detected; there is no public-holiday calendar.
pub fn is_sunday_or_holiday(instant: NaiveDateTime) -> bool {
    instant.weekday() == Weekday::Sun
}

/// Returns the first intervention, in list order, whose interval contains the instant.
pub fn find_intervention(
    instant: NaiveDateTime,
    interventions: &[Intervention],
) -> Option<&Intervention> {
    interventions
        .iter()
        .find(|intervention| intervention.contains(instant))
}

/// Classifies an instant known to lie inside an intervention.
pub fn classify_intervention_instant(instant: NaiveDateTime) -> SubActivityType {
    if is_night(instant) {
        SubActivityType::NightIntervention
    } else if is_sunday_or_holiday(instant) {
        SubActivityType::SundayHolidayIntervention
    } else {
        SubActivityType::Intervention
    }
}

/// Classifies an instant outside any intervention from the shift type alone.
pub fn classify_shift_instant(
    instant: NaiveDateTime,
    activity_type: ActivityType,
    config: &WorkerConfig,
) -> SubActivityType {
    if activity_type.is_standby() {
        SubActivityType::StandbyAtHome
    } else if activity_type.is_training() {
        SubActivityType::Training
    } else if config.is_on_site(instant.time()) {
        SubActivityType::OnSiteGuard
    } else {
        SubActivityType::StandbyOnSite
    }
}

/// Classifies an instant of an activity.
///
/// Intervention classification always overrides the shift's own classification.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::classify;
/// use shift_pay_engine::models::{
///     Activity, ActivityStatus, ActivityType, Intervention, SubActivityType, WorkerConfig,
/// };
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let activity = Activity {
///     id: "activity-1".to_string(),
///     activity_type: ActivityType::Day12,
///     start: at("2023-10-26 08:00:00"),
///     end: at("2023-10-26 20:00:00"),
///     status: ActivityStatus::Entered,
///     interventions: vec![Intervention {
///         id: "inter-1".to_string(),
///         start: at("2023-10-26 09:30:00"),
///         end: at("2023-10-26 10:30:00"),
///         motif: "SAP".into(),
///     }],
///     notes: None,
/// };
/// let config = WorkerConfig::default();
///
/// assert_eq!(classify(at("2023-10-26 09:00:00"), &activity, &config), SubActivityType::OnSiteGuard);
/// assert_eq!(classify(at("2023-10-26 10:00:00"), &activity, &config), SubActivityType::Intervention);
/// assert_eq!(classify(at("2023-10-26 13:00:00"), &activity, &config), SubActivityType::StandbyOnSite);
/// ```
pub fn classify(
    instant: NaiveDateTime,
    activity: &Activity,
    config: &WorkerConfig,
) -> SubActivityType {
    match find_intervention(instant, &activity.interventions) {
        Some(_) => classify_intervention_instant(instant),
        None => classify_shift_instant(instant, activity.activity_type, config),
    }
}
