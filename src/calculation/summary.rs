//! Period summaries over a set of activities.
//!
//! Produces the figures a dashboard shows for a period: total earnings,
//! hours worked, activity and intervention counts, each activity with its
//! duration and pay, and the list of recent interventions with their
//! standalone price.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Activity, ActivityType, InterventionMotif, Worker};

use super::accumulator::calculate_activity_pay;
use super::intervention_pay::price_intervention;
use super::rate_table::RateTable;

/// One intervention in a period summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionSummary {
    /// The intervention.
    pub intervention_id: String,
    /// The activity the intervention happened during.
    pub activity_id: String,
    /// Type of the enclosing activity.
    pub activity_type: ActivityType,
    /// Reason for the call-out.
    pub motif: InterventionMotif,
    /// Start of the intervention.
    pub start: NaiveDateTime,
    /// End of the intervention.
    pub end: NaiveDateTime,
    /// Standalone price of the intervention.
    pub amount: Decimal,
}

/// One activity in a period summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEarnings {
    /// The activity.
    pub activity_id: String,
    /// Type of the activity.
    pub activity_type: ActivityType,
    /// Start of the activity.
    pub start: NaiveDateTime,
    /// Duration of the activity in hours.
    pub hours: Decimal,
    /// Total pay for the activity.
    pub amount: Decimal,
}

/// Aggregated pay figures for a set of activities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Sum of every activity's total.
    pub total_amount: Decimal,
    /// Sum of every activity's duration.
    pub total_hours: Decimal,
    /// Number of activities.
    pub activity_count: usize,
    /// Number of interventions across all activities.
    pub intervention_count: usize,
    /// Activities, most recent first.
    pub activities: Vec<ActivityEarnings>,
    /// Interventions, most recent first.
    pub interventions: Vec<InterventionSummary>,
}

/// Summarizes a set of activities for one worker.
///
/// Each activity is priced with [`calculate_activity_pay`] and each of its
/// interventions with [`price_intervention`]. The first invalid activity
/// aborts the summary with its error.
pub fn summarize_activities(
    activities: &[Activity],
    worker: &Worker,
    rates: &RateTable,
) -> EngineResult<ActivitySummary> {
    let mut summary = ActivitySummary {
        activity_count: activities.len(),
        ..ActivitySummary::default()
    };

    for activity in activities {
        let result = calculate_activity_pay(activity, worker, rates)?;
        let hours = result.total_hours();
        summary.total_amount += result.total_amount;
        summary.total_hours += hours;
        summary.activities.push(ActivityEarnings {
            activity_id: activity.id.clone(),
            activity_type: activity.activity_type,
            start: activity.start,
            hours,
            amount: result.total_amount,
        });

        for intervention in &activity.interventions {
            let priced = price_intervention(intervention, worker, rates)?;
            summary.interventions.push(InterventionSummary {
                intervention_id: intervention.id.clone(),
                activity_id: activity.id.clone(),
                activity_type: activity.activity_type,
                motif: intervention.motif.clone(),
                start: intervention.start,
                end: intervention.end,
                amount: priced.amount,
            });
        }
    }

    summary.intervention_count = summary.interventions.len();
    summary
        .activities
        .sort_by(|a, b| b.start.cmp(&a.start).then_with(|| a.activity_id.cmp(&b.activity_id)));
    summary
        .interventions
        .sort_by(|a, b| b.start.cmp(&a.start).then_with(|| a.intervention_id.cmp(&b.intervention_id)));

    debug!(
        worker_id = %worker.id,
        activities = summary.activity_count,
        interventions = summary.intervention_count,
        total_amount = %summary.total_amount,
        "Summarized activities"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{ActivityStatus, Grade, Intervention};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn day_guard(id: &str, date: &str, interventions: Vec<Intervention>) -> Activity {
        Activity {
            id: id.to_string(),
            activity_type: ActivityType::Day12,
            start: make_datetime(date, "08:00:00"),
            end: make_datetime(date, "20:00:00"),
            status: ActivityStatus::Entered,
            interventions,
            notes: None,
        }
    }

    fn make_intervention(id: &str, date: &str, start: &str, end: &str) -> Intervention {
        Intervention {
            id: id.to_string(),
            start: make_datetime(date, start),
            end: make_datetime(date, end),
            motif: InterventionMotif::Rescue,
        }
    }

    #[test]
    fn test_empty_summary() {
        let worker = Worker::new("user-1", Grade::Sergent);
        let summary = summarize_activities(&[], &worker, &RateTable::default()).unwrap();
        assert_eq!(summary, ActivitySummary::default());
    }

    #[test]
    fn test_summary_totals_and_ordering() {
        let activities = vec![
            day_guard(
                "activity-1",
                "2023-10-26",
                vec![make_intervention("inter-1", "2023-10-26", "09:30:00", "10:30:00")],
            ),
            day_guard(
                "activity-2",
                "2023-10-27",
                vec![make_intervention("inter-2", "2023-10-27", "15:00:00", "16:00:00")],
            ),
            day_guard("activity-3", "2023-10-25", vec![]),
        ];
        let worker = Worker::new("user-1", Grade::Sergent);

        let summary = summarize_activities(&activities, &worker, &RateTable::default()).unwrap();

        assert_eq!(summary.activity_count, 3);
        assert_eq!(summary.intervention_count, 2);
        assert_eq!(summary.total_hours, dec("36"));
        // Two guards with one intervention each (10.43 × 6.95) plus one plain guard (68.838)
        assert_eq!(summary.total_amount, dec("213.815"));

        let ids: Vec<&str> = summary
            .interventions
            .iter()
            .map(|i| i.intervention_id.as_str())
            .collect();
        assert_eq!(ids, vec!["inter-2", "inter-1"]);

        let rows: Vec<(&str, Decimal, Decimal)> = summary
            .activities
            .iter()
            .map(|row| (row.activity_id.as_str(), row.hours, row.amount))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("activity-2", dec("12"), dec("72.4885")),
                ("activity-1", dec("12"), dec("72.4885")),
                ("activity-3", dec("12"), dec("68.838")),
            ]
        );
        assert_eq!(summary.interventions[0].activity_id, "activity-2");
        assert_eq!(summary.interventions[0].amount, dec("10.43"));
    }

    #[test]
    fn test_invalid_activity_aborts_summary() {
        let mut broken = day_guard("activity-1", "2023-10-26", vec![]);
        broken.end = make_datetime("2023-10-26", "07:00:00");
        let worker = Worker::new("user-1", Grade::Sergent);

        let result = summarize_activities(&[broken], &worker, &RateTable::default());
        assert!(matches!(result, Err(EngineError::InvalidActivity { .. })));
    }
}
