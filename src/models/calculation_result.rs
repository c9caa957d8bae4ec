//! Calculation result models for the shift pay engine.
//!
//! This module contains the [`CalculationResult`] type and its billing lines,
//! along with the [`SubActivityType`] classification every line carries.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The classification assigned to each priced segment of an activity.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::SubActivityType;
///
/// assert!(SubActivityType::NightIntervention.is_intervention());
/// assert!(!SubActivityType::OnSiteGuard.is_intervention());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubActivityType {
    /// Guard time spent on site during the configured on-site slots.
    OnSiteGuard,
    /// Guard time outside the on-site slots.
    StandbyOnSite,
    /// Standby at home.
    StandbyAtHome,
    /// Intervention during the day on a weekday.
    Intervention,
    /// Intervention between 22:00 and 07:00.
    NightIntervention,
    /// Intervention on a Sunday or public holiday.
    SundayHolidayIntervention,
    /// Training.
    Training,
}

impl SubActivityType {
    /// All sub-activity types.
    pub const ALL: [SubActivityType; 7] = [
        SubActivityType::OnSiteGuard,
        SubActivityType::StandbyOnSite,
        SubActivityType::StandbyAtHome,
        SubActivityType::Intervention,
        SubActivityType::NightIntervention,
        SubActivityType::SundayHolidayIntervention,
        SubActivityType::Training,
    ];

    /// Returns true for the three intervention variants.
    pub fn is_intervention(self) -> bool {
        matches!(
            self,
            SubActivityType::Intervention
                | SubActivityType::NightIntervention
                | SubActivityType::SundayHolidayIntervention
        )
    }

    /// Returns the serialised tag of the type.
    pub fn as_tag(self) -> &'static str {
        match self {
            SubActivityType::OnSiteGuard => "on_site_guard",
            SubActivityType::StandbyOnSite => "standby_on_site",
            SubActivityType::StandbyAtHome => "standby_at_home",
            SubActivityType::Intervention => "intervention",
            SubActivityType::NightIntervention => "night_intervention",
            SubActivityType::SundayHolidayIntervention => "sunday_holiday_intervention",
            SubActivityType::Training => "training",
        }
    }
}

impl fmt::Display for SubActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubActivityType::OnSiteGuard => "Garde CS",
            SubActivityType::StandbyOnSite => "Astreinte CS",
            SubActivityType::StandbyAtHome => "Astreinte domicile",
            SubActivityType::Intervention => "Intervention",
            SubActivityType::NightIntervention => "Intervention de nuit",
            SubActivityType::SundayHolidayIntervention => "Intervention dimanche/férié",
            SubActivityType::Training => "Formation",
        };
        f.write_str(label)
    }
}

/// A billing line: a maximal contiguous segment priced at one classification.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::{CalculationLine, SubActivityType};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = CalculationLine {
///     description: "Garde CS".to_string(),
///     sub_activity_type: SubActivityType::OnSiteGuard,
///     duration_hours: Decimal::from(4),
///     rate: Decimal::from_str("10.43").unwrap(),
///     coefficient: Decimal::from_str("0.65").unwrap(),
///     bonus: Decimal::ONE,
///     total: Decimal::from_str("27.118").unwrap(),
///     start: NaiveDateTime::parse_from_str("2023-10-26 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2023-10-26 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     intervention_id: None,
/// };
/// assert_eq!(line.duration_hours * line.rate * line.coefficient, line.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationLine {
    /// Human-readable label for the line.
    pub description: String,
    /// Classification of every instant in the line.
    pub sub_activity_type: SubActivityType,
    /// Length of the line in hours.
    pub duration_hours: Decimal,
    /// Base hourly rate of the worker's grade.
    pub rate: Decimal,
    /// Coefficient applied for the classification.
    pub coefficient: Decimal,
    /// Extra multiplier, always 1 with per-classification coefficients.
    pub bonus: Decimal,
    /// Amount owed for the line.
    pub total: Decimal,
    /// Start of the line (inclusive).
    pub start: NaiveDateTime,
    /// End of the line (exclusive).
    pub end: NaiveDateTime,
    /// The intervention this line belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<String>,
}

/// The result of pricing one activity: ordered billing lines and their total.
///
/// Lines are contiguous: the first starts at the activity start, each one ends
/// where the next begins, and the last ends at the activity end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Billing lines in chronological order.
    pub lines: Vec<CalculationLine>,
    /// Sum of the line totals.
    pub total_amount: Decimal,
}

impl CalculationResult {
    /// Total hours across all lines.
    pub fn total_hours(&self) -> Decimal {
        self.lines.iter().map(|line| line.duration_hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample_line(hours: &str, total: &str, start: &str, end: &str) -> CalculationLine {
        CalculationLine {
            description: "Garde CS".to_string(),
            sub_activity_type: SubActivityType::OnSiteGuard,
            duration_hours: dec(hours),
            rate: dec("10.43"),
            coefficient: dec("0.65"),
            bonus: Decimal::ONE,
            total: dec(total),
            start: make_datetime(start),
            end: make_datetime(end),
            intervention_id: None,
        }
    }

    #[test]
    fn test_sub_activity_type_serialization() {
        assert_eq!(
            serde_json::to_string(&SubActivityType::SundayHolidayIntervention).unwrap(),
            "\"sunday_holiday_intervention\""
        );
        let parsed: SubActivityType = serde_json::from_str("\"standby_at_home\"").unwrap();
        assert_eq!(parsed, SubActivityType::StandbyAtHome);
    }

    #[test]
    fn test_tags_match_serialization() {
        for sub_activity in SubActivityType::ALL {
            let json = serde_json::to_string(&sub_activity).unwrap();
            assert_eq!(json, format!("\"{}\"", sub_activity.as_tag()));
        }
    }

    #[test]
    fn test_only_three_intervention_types() {
        let count = SubActivityType::ALL
            .iter()
            .filter(|sub_activity| sub_activity.is_intervention())
            .count();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_total_hours_sums_lines() {
        let result = CalculationResult {
            lines: vec![
                sample_line("4", "27.118", "2023-10-26 08:00:00", "2023-10-26 12:00:00"),
                sample_line("0.5", "3.38975", "2023-10-26 12:00:00", "2023-10-26 12:30:00"),
            ],
            total_amount: dec("30.50775"),
        };
        assert_eq!(result.total_hours(), dec("4.5"));
    }

    #[test]
    fn test_line_without_intervention_omits_id() {
        let line = sample_line("4", "27.118", "2023-10-26 08:00:00", "2023-10-26 12:00:00");
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("intervention_id").is_none());
        assert_eq!(json["sub_activity_type"], "on_site_guard");
    }

    #[test]
    fn test_empty_result_is_default() {
        let result = CalculationResult::default();
        assert!(result.lines.is_empty());
        assert_eq!(result.total_amount, Decimal::ZERO);
    }
}
