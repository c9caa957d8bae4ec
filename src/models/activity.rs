//! Activity model and related types.
//!
//! This module defines the Activity and Intervention structs for representing
//! logged guard and standby shifts and the call-outs that happen during them.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of shift an activity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// 24 hour guard (G24).
    G24,
    /// 12 hour day guard (12J).
    Day12,
    /// 12 hour night guard (12N).
    Night12,
    /// Guard with free hours.
    FreeGuard,
    /// Training session.
    Training,
    /// 24 hour standby (AST24).
    Standby24,
    /// Day standby (ASTJ).
    StandbyDay,
    /// Night standby (ASTN).
    StandbyNight,
}

impl ActivityType {
    /// Returns true for the three standby types, which are paid as standby at home.
    pub fn is_standby(self) -> bool {
        matches!(
            self,
            ActivityType::Standby24 | ActivityType::StandbyDay | ActivityType::StandbyNight
        )
    }

    /// Returns true for training sessions.
    pub fn is_training(self) -> bool {
        self == ActivityType::Training
    }

    /// Nominal length of the shift in hours, if the type has a fixed one.
    pub fn nominal_hours(self) -> Option<i64> {
        match self {
            ActivityType::G24 | ActivityType::Standby24 => Some(24),
            ActivityType::Day12
            | ActivityType::Night12
            | ActivityType::StandbyDay
            | ActivityType::StandbyNight => Some(12),
            ActivityType::FreeGuard | ActivityType::Training => None,
        }
    }

    /// Hour of day at which this type of shift usually starts.
    pub fn default_start_hour(self) -> Option<u32> {
        match self {
            ActivityType::G24
            | ActivityType::Day12
            | ActivityType::StandbyDay
            | ActivityType::Standby24 => Some(8),
            ActivityType::Night12 | ActivityType::StandbyNight => Some(20),
            ActivityType::FreeGuard | ActivityType::Training => None,
        }
    }

    /// Returns the usual `(start, end)` window for this type on the given date.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_pay_engine::models::ActivityType;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
    /// let (start, end) = ActivityType::Night12.default_window(date).unwrap();
    /// assert_eq!(start.to_string(), "2023-11-01 20:00:00");
    /// assert_eq!(end.to_string(), "2023-11-02 08:00:00");
    ///
    /// assert!(ActivityType::Training.default_window(date).is_none());
    /// ```
    pub fn default_window(self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = date.and_hms_opt(self.default_start_hour()?, 0, 0)?;
        let end = start + Duration::hours(self.nominal_hours()?);
        Some((start, end))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityType::G24 => "Garde 24h (G24)",
            ActivityType::Day12 => "Garde 12h Jour (12J)",
            ActivityType::Night12 => "Garde 12h Nuit (12N)",
            ActivityType::FreeGuard => "Garde libre",
            ActivityType::Training => "Formation",
            ActivityType::Standby24 => "Astreinte 24h (AST24)",
            ActivityType::StandbyDay => "Astreinte Jour (ASTJ)",
            ActivityType::StandbyNight => "Astreinte Nuit (ASTN)",
        };
        f.write_str(label)
    }
}

/// Workflow status of an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Logged by the worker.
    #[default]
    Entered,
    /// Checked by the station.
    Validated,
    /// Included in an invoice.
    Invoiced,
}

/// Reason for an intervention.
///
/// The four standard call-out categories are closed tags; anything else is
/// kept verbatim. Serialised as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterventionMotif {
    /// Road accident (AVP).
    RoadAccident,
    /// Rescue and first aid (SAP).
    Rescue,
    /// Fire (INC).
    Fire,
    /// Miscellaneous operation (DIV).
    Miscellaneous,
    /// Free-text motif.
    Other(String),
}

impl InterventionMotif {
    /// Returns the motif text as entered.
    pub fn as_str(&self) -> &str {
        match self {
            InterventionMotif::RoadAccident => "AVP",
            InterventionMotif::Rescue => "SAP",
            InterventionMotif::Fire => "INC",
            InterventionMotif::Miscellaneous => "DIV",
            InterventionMotif::Other(text) => text,
        }
    }
}

impl From<String> for InterventionMotif {
    fn from(text: String) -> Self {
        match text.as_str() {
            "AVP" => InterventionMotif::RoadAccident,
            "SAP" => InterventionMotif::Rescue,
            "INC" => InterventionMotif::Fire,
            "DIV" => InterventionMotif::Miscellaneous,
            _ => InterventionMotif::Other(text),
        }
    }
}

impl From<&str> for InterventionMotif {
    fn from(text: &str) -> Self {
        InterventionMotif::from(text.to_string())
    }
}

impl From<InterventionMotif> for String {
    fn from(motif: InterventionMotif) -> Self {
        match motif {
            InterventionMotif::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterventionMotif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call-out nested inside an activity.
///
/// Interventions are identified by `id`; two interventions with the same motif
/// are still distinct events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Unique identifier for the intervention.
    pub id: String,
    /// When the intervention started.
    pub start: NaiveDateTime,
    /// When the intervention ended.
    pub end: NaiveDateTime,
    /// Reason for the call-out.
    pub motif: InterventionMotif,
}

impl Intervention {
    /// Returns true if `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Duration of the intervention in hours.
    pub fn duration_hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }

    /// Checks that the intervention interval is not reversed.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end < self.start {
            return Err(EngineError::InvalidIntervention {
                intervention_id: self.id.clone(),
                message: "end time before start time".to_string(),
            });
        }
        Ok(())
    }
}

/// A logged shift with its interval and nested interventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for the activity.
    pub id: String,
    /// The kind of shift.
    pub activity_type: ActivityType,
    /// When the shift started.
    pub start: NaiveDateTime,
    /// When the shift ended.
    pub end: NaiveDateTime,
    /// Workflow status.
    #[serde(default)]
    pub status: ActivityStatus,
    /// Interventions during the shift, in the order they were logged.
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Activity {
    /// Duration of the activity in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_pay_engine::models::{Activity, ActivityStatus, ActivityType};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let activity = Activity {
    ///     id: "activity-1".to_string(),
    ///     activity_type: ActivityType::Day12,
    ///     start: NaiveDateTime::parse_from_str("2023-10-26 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end: NaiveDateTime::parse_from_str("2023-10-26 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     status: ActivityStatus::Entered,
    ///     interventions: vec![],
    ///     notes: None,
    /// };
    /// assert_eq!(activity.duration_hours(), Decimal::new(12, 0));
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }

    /// Returns true if the activity starts in the given calendar month.
    pub fn starts_in_month(&self, year: i32, month: u32) -> bool {
        self.start.year() == year && self.start.month() == month
    }

    /// Checks the interval preconditions of the activity and its interventions.
    ///
    /// The activity must not end before it starts, and every intervention must
    /// lie within `[start, end]`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end < self.start {
            return Err(EngineError::InvalidActivity {
                activity_id: self.id.clone(),
                message: "end time before start time".to_string(),
            });
        }

        for intervention in &self.interventions {
            intervention.validate()?;
            if intervention.start < self.start || intervention.end > self.end {
                return Err(EngineError::InvalidIntervention {
                    intervention_id: intervention.id.clone(),
                    message: format!(
                        "interval {} - {} lies outside activity '{}'",
                        intervention.start, intervention.end, self.id
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Number of hours between two instants, at nanosecond resolution.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let elapsed = end - start;
    match elapsed.num_nanoseconds() {
        Some(nanos) => Decimal::from(nanos) / Decimal::from(NANOS_PER_HOUR),
        // Beyond ~292 years nanoseconds overflow i64
        None => Decimal::from(elapsed.num_seconds()) / Decimal::from(3600),
    }
}

const NANOS_PER_HOUR: i64 = 3_600_000_000_000;
