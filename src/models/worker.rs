//! Worker model and pay configuration types.
//!
//! This module defines the Worker struct, the Grade enum, and the per-worker
//! configuration (on-site time slots and coefficient table) that drives
//! shift classification and pricing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::SubActivityType;

/// A firefighter grade. Each grade maps to one base hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Sapeur.
    Sapeur,
    /// Caporal / Caporal-chef.
    Caporal,
    /// Sergent / Sergent-chef / Adjudant / Adjudant-chef.
    Sergent,
    /// Lieutenant / Capitaine / Commandant / Colonel.
    Lieutenant,
}

impl Grade {
    /// All grades, in rank order.
    pub const ALL: [Grade; 4] = [
        Grade::Sapeur,
        Grade::Caporal,
        Grade::Sergent,
        Grade::Lieutenant,
    ];

    /// Returns the serialised tag of the grade.
    pub fn as_tag(self) -> &'static str {
        match self {
            Grade::Sapeur => "sapeur",
            Grade::Caporal => "caporal",
            Grade::Sergent => "sergent",
            Grade::Lieutenant => "lieutenant",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::Sapeur => "Sapeur",
            Grade::Caporal => "Caporal / Caporal-chef",
            Grade::Sergent => "Sergent / Sergent-chef / Adjudant / Adjudant-chef",
            Grade::Lieutenant => "Lieutenant / Capitaine / Commandant / Colonel",
        };
        f.write_str(label)
    }
}

impl FromStr for Grade {
    type Err = EngineError;

    /// Parses a grade tag, ignoring case.
    ///
    /// ```
    /// use shift_pay_engine::models::Grade;
    ///
    /// assert_eq!("Sergent".parse::<Grade>().unwrap(), Grade::Sergent);
    /// assert!("brigadier".parse::<Grade>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownGrade {
                grade: s.to_string(),
            })
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
struct RawTimeSlot {
    #[serde(with = "hh_mm")]
    start: NaiveTime,
    #[serde(with = "hh_mm")]
    end: NaiveTime,
}

/// A recurring daily window, `[start, end)` within one day.
///
/// Serialised as `{"start": "HH:MM", "end": "HH:MM"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    #[serde(with = "hh_mm")]
    start: NaiveTime,
    #[serde(with = "hh_mm")]
    end: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot, rejecting empty or reversed windows.
    ///
    /// ```
    /// use shift_pay_engine::models::TimeSlot;
    /// use chrono::NaiveTime;
    ///
    /// let morning = TimeSlot::new(
    ///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    /// );
    /// assert!(morning.is_ok());
    ///
    /// let reversed = TimeSlot::new(
    ///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    ///     NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    /// );
    /// assert!(reversed.is_err());
    /// ```
    pub fn new(start: NaiveTime, end: NaiveTime) -> EngineResult<Self> {
        if start >= end {
            return Err(EngineError::InvalidTimeSlot {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a slot from whole hours.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> EngineResult<Self> {
        let time = |hour: u32| {
            NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(|| EngineError::InvalidTimeSlot {
                start: format!("{:02}:00", start_hour),
                end: format!("{:02}:00", end_hour),
            })
        };
        Self::new(time(start_hour)?, time(end_hour)?)
    }

    /// Start of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the window (exclusive).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns true if the time of day falls inside the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = EngineError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::new(raw.start, raw.end)
    }
}

/// Largest coefficient a table accepts.
pub const MAX_COEFFICIENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Coefficient per sub-activity type, applied to the base hourly rate.
///
/// The table holds one value for every [`SubActivityType`], so a lookup can
/// never miss. Building one from a map fails if any key is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<SubActivityType, Decimal>")]
pub struct CoefficientTable {
    on_site_guard: Decimal,
    standby_on_site: Decimal,
    standby_at_home: Decimal,
    intervention: Decimal,
    night_intervention: Decimal,
    sunday_holiday_intervention: Decimal,
    training: Decimal,
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self {
            on_site_guard: Decimal::new(65, 2),
            standby_on_site: Decimal::new(35, 2),
            standby_at_home: Decimal::new(8, 2),
            intervention: Decimal::ONE,
            night_intervention: Decimal::TWO,
            sunday_holiday_intervention: Decimal::new(15, 1),
            training: Decimal::ONE,
        }
    }
}

impl CoefficientTable {
    /// Returns the coefficient for a sub-activity type.
    pub fn get(&self, sub_activity: SubActivityType) -> Decimal {
        match sub_activity {
            SubActivityType::OnSiteGuard => self.on_site_guard,
            SubActivityType::StandbyOnSite => self.standby_on_site,
            SubActivityType::StandbyAtHome => self.standby_at_home,
            SubActivityType::Intervention => self.intervention,
            SubActivityType::NightIntervention => self.night_intervention,
            SubActivityType::SundayHolidayIntervention => self.sunday_holiday_intervention,
            SubActivityType::Training => self.training,
        }
    }

    /// Replaces one coefficient. Values outside `0..=MAX_COEFFICIENT` are
    /// rejected.
    pub fn set(&mut self, sub_activity: SubActivityType, value: Decimal) -> EngineResult<()> {
        if value < Decimal::ZERO || value > MAX_COEFFICIENT {
            return Err(EngineError::InvalidCoefficient {
                sub_activity: sub_activity.as_tag().to_string(),
                value: value.to_string(),
            });
        }
        let slot = match sub_activity {
            SubActivityType::OnSiteGuard => &mut self.on_site_guard,
            SubActivityType::StandbyOnSite => &mut self.standby_on_site,
            SubActivityType::StandbyAtHome => &mut self.standby_at_home,
            SubActivityType::Intervention => &mut self.intervention,
            SubActivityType::NightIntervention => &mut self.night_intervention,
            SubActivityType::SundayHolidayIntervention => &mut self.sunday_holiday_intervention,
            SubActivityType::Training => &mut self.training,
        };
        *slot = value;
        Ok(())
    }

    /// Returns a copy with every entry of `overrides` applied on top.
    pub fn with_overrides(&self, overrides: &HashMap<SubActivityType, Decimal>) -> EngineResult<Self> {
        let mut table = self.clone();
        for (&sub_activity, &value) in overrides {
            table.set(sub_activity, value)?;
        }
        Ok(table)
    }
}

impl TryFrom<HashMap<SubActivityType, Decimal>> for CoefficientTable {
    type Error = EngineError;

    fn try_from(map: HashMap<SubActivityType, Decimal>) -> Result<Self, Self::Error> {
        if let Some(missing) = SubActivityType::ALL
            .into_iter()
            .find(|sub_activity| !map.contains_key(sub_activity))
        {
            return Err(EngineError::MissingCoefficient {
                sub_activity: missing.as_tag().to_string(),
            });
        }
        CoefficientTable::default().with_overrides(&map)
    }
}

/// Fully resolved pay configuration for one worker.
///
/// Passed explicitly to every calculation; the engine never reads it from
/// shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Daily windows during which a guard counts as on-site guard time.
    pub on_site_slots: Vec<TimeSlot>,
    /// Coefficient per sub-activity type.
    pub coefficients: CoefficientTable,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            on_site_slots: vec![
                TimeSlot {
                    start: whole_hour(8),
                    end: whole_hour(12),
                },
                TimeSlot {
                    start: whole_hour(14),
                    end: whole_hour(18),
                },
            ],
            coefficients: CoefficientTable::default(),
        }
    }
}

fn whole_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

impl WorkerConfig {
    /// Returns true if the time of day falls in any on-site slot.
    pub fn is_on_site(&self, time: NaiveTime) -> bool {
        self.on_site_slots.iter().any(|slot| slot.contains(time))
    }

    /// Merges a worker's own settings onto this configuration.
    ///
    /// A provided slot list replaces the whole list. Each provided coefficient
    /// replaces only its own entry, so keys the worker never customised keep
    /// the value from `self`.
    ///
    /// ```
    /// use shift_pay_engine::models::{SubActivityType, WorkerConfig, WorkerSettings};
    /// use rust_decimal::Decimal;
    ///
    /// let mut settings = WorkerSettings::default();
    /// settings.coefficients.insert(SubActivityType::OnSiteGuard, Decimal::new(70, 2));
    ///
    /// let merged = WorkerConfig::default().merged_with(&settings).unwrap();
    /// assert_eq!(merged.coefficients.get(SubActivityType::OnSiteGuard), Decimal::new(70, 2));
    /// assert_eq!(merged.coefficients.get(SubActivityType::StandbyOnSite), Decimal::new(35, 2));
    /// ```
    pub fn merged_with(&self, settings: &WorkerSettings) -> EngineResult<Self> {
        let on_site_slots = settings
            .on_site_slots
            .clone()
            .unwrap_or_else(|| self.on_site_slots.clone());
        let coefficients = self.coefficients.with_overrides(&settings.coefficients)?;
        Ok(Self {
            on_site_slots,
            coefficients,
        })
    }
}

/// A worker's own, possibly partial, pay settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerSettings {
    /// Replacement on-site slots, if the worker configured any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_site_slots: Option<Vec<TimeSlot>>,
    /// Coefficients the worker customised.
    #[serde(default)]
    pub coefficients: HashMap<SubActivityType, Decimal>,
}

/// A worker subject to pay calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// The worker's grade, which selects the base hourly rate.
    pub grade: Grade,
    /// The worker's resolved pay configuration.
    #[serde(default)]
    pub config: WorkerConfig,
}

impl Worker {
    /// Creates a worker with the default configuration.
    pub fn new(id: impl Into<String>, grade: Grade) -> Self {
        Self {
            id: id.into(),
            grade,
            config: WorkerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_grade_parses_case_insensitively() {
        assert_eq!("sapeur".parse::<Grade>().unwrap(), Grade::Sapeur);
        assert_eq!("LIEUTENANT".parse::<Grade>().unwrap(), Grade::Lieutenant);
    }

    #[test]
    fn test_unknown_grade_is_an_error() {
        match "brigadier".parse::<Grade>() {
            Err(EngineError::UnknownGrade { grade }) => assert_eq!(grade, "brigadier"),
            other => panic!("Expected UnknownGrade error, got {:?}", other),
        }
    }

    #[test]
    fn test_grade_serialization() {
        assert_eq!(
            serde_json::to_string(&Grade::Caporal).unwrap(),
            "\"caporal\""
        );
        assert!(serde_json::from_str::<Grade>("\"brigadier\"").is_err());
    }

    #[test]
    fn test_time_slot_rejects_empty_window() {
        assert!(TimeSlot::new(time(8, 0), time(8, 0)).is_err());
    }

    #[test]
    fn test_time_slot_contains_is_half_open() {
        let slot = TimeSlot::from_hours(8, 12).unwrap();
        assert!(slot.contains(time(8, 0)));
        assert!(slot.contains(time(11, 59)));
        assert!(!slot.contains(time(12, 0)));
        assert!(!slot.contains(time(7, 59)));
    }

    #[test]
    fn test_time_slot_deserializes_hh_mm() {
        let slot: TimeSlot = serde_json::from_str(r#"{"start": "08:30", "end": "12:15"}"#).unwrap();
        assert_eq!(slot.start(), time(8, 30));
        assert_eq!(slot.end(), time(12, 15));
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"start":"08:30","end":"12:15"}"#
        );
    }

    #[test]
    fn test_time_slot_deserialization_rejects_reversed_window() {
        let result = serde_json::from_str::<TimeSlot>(r#"{"start": "18:00", "end": "14:00"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_slots() {
        let config = WorkerConfig::default();
        assert!(config.is_on_site(time(9, 0)));
        assert!(!config.is_on_site(time(12, 30)));
        assert!(config.is_on_site(time(17, 59)));
        assert!(!config.is_on_site(time(18, 0)));
    }

    #[test]
    fn test_default_coefficients() {
        let table = CoefficientTable::default();
        assert_eq!(table.get(SubActivityType::OnSiteGuard), Decimal::new(65, 2));
        assert_eq!(table.get(SubActivityType::StandbyOnSite), Decimal::new(35, 2));
        assert_eq!(table.get(SubActivityType::StandbyAtHome), Decimal::new(8, 2));
        assert_eq!(table.get(SubActivityType::Intervention), Decimal::ONE);
        assert_eq!(table.get(SubActivityType::NightIntervention), Decimal::TWO);
        assert_eq!(
            table.get(SubActivityType::SundayHolidayIntervention),
            Decimal::new(15, 1)
        );
        assert_eq!(table.get(SubActivityType::Training), Decimal::ONE);
    }

    #[test]
    fn test_negative_coefficient_is_rejected() {
        let mut table = CoefficientTable::default();
        let result = table.set(SubActivityType::Training, Decimal::new(-1, 0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_coefficient_above_ceiling_is_rejected() {
        let mut table = CoefficientTable::default();
        assert!(table.set(SubActivityType::Training, MAX_COEFFICIENT).is_ok());

        let result = table.set(SubActivityType::StandbyOnSite, Decimal::MAX);
        assert!(matches!(
            result,
            Err(EngineError::InvalidCoefficient { .. })
        ));
        assert_eq!(table.get(SubActivityType::StandbyOnSite), Decimal::new(35, 2));
    }

    #[test]
    fn test_table_from_incomplete_map_reports_missing_key() {
        let mut map = HashMap::new();
        for sub_activity in SubActivityType::ALL {
            map.insert(sub_activity, Decimal::ONE);
        }
        map.remove(&SubActivityType::NightIntervention);

        match CoefficientTable::try_from(map) {
            Err(EngineError::MissingCoefficient { sub_activity }) => {
                assert_eq!(sub_activity, "night_intervention");
            }
            other => panic!("Expected MissingCoefficient error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_keeps_defaults_for_untouched_keys() {
        let mut settings = WorkerSettings::default();
        settings
            .coefficients
            .insert(SubActivityType::StandbyAtHome, Decimal::new(10, 2));

        let merged = WorkerConfig::default().merged_with(&settings).unwrap();
        assert_eq!(
            merged.coefficients.get(SubActivityType::StandbyAtHome),
            Decimal::new(10, 2)
        );
        assert_eq!(
            merged.coefficients.get(SubActivityType::NightIntervention),
            Decimal::TWO
        );
        assert_eq!(merged.on_site_slots, WorkerConfig::default().on_site_slots);
    }

    #[test]
    fn test_merge_replaces_slot_list() {
        let settings = WorkerSettings {
            on_site_slots: Some(vec![TimeSlot::from_hours(9, 17).unwrap()]),
            coefficients: HashMap::new(),
        };

        let merged = WorkerConfig::default().merged_with(&settings).unwrap();
        assert_eq!(merged.on_site_slots.len(), 1);
        assert!(merged.is_on_site(time(12, 30)));
    }

    #[test]
    fn test_settings_deserialize_sparse_coefficients() {
        let json = r#"{
            "coefficients": { "on_site_guard": "0.70" }
        }"#;
        let settings: WorkerSettings = serde_json::from_str(json).unwrap();
        assert!(settings.on_site_slots.is_none());
        assert_eq!(
            settings.coefficients.get(&SubActivityType::OnSiteGuard),
            Some(&Decimal::new(70, 2))
        );
    }
}
