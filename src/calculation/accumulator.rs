//! Activity pay accumulation.
//!
//! This module prices a whole activity: it segments the activity interval,
//! prices each segment at the worker's coefficient for its classification,
//! and coalesces contiguous segments into billing lines.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    Activity, ActivityType, CalculationLine, CalculationResult, Intervention, Worker, WorkerConfig,
    hours_between,
};

use super::aggregator::aggregate_lines;
use super::rate_table::RateTable;
use super::segmentation::{ShiftSegment, segment_interval};

/// Bonus multiplier on every line. Night and Sunday premiums live in their
/// own coefficients, so this is always one.
pub const LINE_BONUS: Decimal = Decimal::ONE;

/// Calculates the pay owed for an activity.
///
/// The activity interval is split at every instant where classification can
/// change, each segment is priced at
/// `hours × base rate × coefficient × bonus`, and contiguous segments are
/// merged into one line when they share classification, coefficient, bonus
/// and originating intervention. Interventions are compared by id, never by
/// motif, so two distinct call-outs always produce distinct lines.
///
/// # Arguments
///
/// * `activity` - The activity to price
/// * `worker` - The worker, carrying grade and resolved configuration
/// * `rates` - The grade rate table
///
/// # Returns
///
/// The billing lines and their total, or an error if the activity or one of
/// its interventions has a malformed interval. A zero-length activity yields
/// no lines and a zero total.
///
/// # Examples
///
/// ```
/// use shift_pay_engine::calculation::{RateTable, calculate_activity_pay};
/// use shift_pay_engine::models::{Activity, ActivityStatus, ActivityType, Grade, Worker};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let activity = Activity {
///     id: "activity-1".to_string(),
///     activity_type: ActivityType::Day12,
///     start: at("2023-10-26 08:00:00"),
///     end: at("2023-10-26 20:00:00"),
///     status: ActivityStatus::Entered,
///     interventions: vec![],
///     notes: None,
/// };
/// let worker = Worker::new("user-1", Grade::Sergent);
///
/// let result = calculate_activity_pay(&activity, &worker, &RateTable::default()).unwrap();
/// assert_eq!(result.lines.len(), 4);
/// // 10.43 × (4 × 0.65 + 2 × 0.35 + 4 × 0.65 + 2 × 0.35)
/// assert_eq!(result.total_amount, Decimal::from_str("68.838").unwrap());
/// ```
pub fn calculate_activity_pay(
    activity: &Activity,
    worker: &Worker,
    rates: &RateTable,
) -> EngineResult<CalculationResult> {
    activity.validate()?;

    let base_rate = rates.rate(worker.grade);
    let lines = price_interval(
        activity.start,
        activity.end,
        activity.activity_type,
        &activity.interventions,
        &worker.config,
        base_rate,
    );
    let result = aggregate_lines(lines);

    debug!(
        activity_id = %activity.id,
        worker_id = %worker.id,
        grade = worker.grade.as_tag(),
        lines = result.lines.len(),
        total_amount = %result.total_amount,
        "Priced activity"
    );

    Ok(result)
}

/// Prices `[start, end)` and returns its coalesced billing lines.
pub(crate) fn price_interval(
    start: NaiveDateTime,
    end: NaiveDateTime,
    activity_type: ActivityType,
    interventions: &[Intervention],
    config: &WorkerConfig,
    base_rate: Decimal,
) -> Vec<CalculationLine> {
    let mut lines: Vec<CalculationLine> = Vec::new();

    for segment in segment_interval(start, end, activity_type, interventions, config) {
        let coefficient = config.coefficients.get(segment.sub_activity_type);
        match lines.last_mut() {
            Some(line) if continues_line(line, &segment, coefficient) => {
                extend_line(line, segment.end);
            }
            _ => lines.push(open_line(&segment, base_rate, coefficient)),
        }
    }

    lines
}

fn continues_line(line: &CalculationLine, segment: &ShiftSegment<'_>, coefficient: Decimal) -> bool {
    line.end == segment.start
        && line.sub_activity_type == segment.sub_activity_type
        && line.coefficient == coefficient
        && line.bonus == LINE_BONUS
        && line.intervention_id.as_deref() == segment.intervention.map(|i| i.id.as_str())
}

fn open_line(segment: &ShiftSegment<'_>, base_rate: Decimal, coefficient: Decimal) -> CalculationLine {
    let description = match segment.intervention {
        Some(intervention) => format!("{} ({})", segment.sub_activity_type, intervention.motif),
        None => segment.sub_activity_type.to_string(),
    };
    let duration_hours = hours_between(segment.start, segment.end);

    CalculationLine {
        description,
        sub_activity_type: segment.sub_activity_type,
        duration_hours,
        rate: base_rate,
        coefficient,
        bonus: LINE_BONUS,
        total: line_amount(duration_hours, base_rate, coefficient, LINE_BONUS),
        start: segment.start,
        end: segment.end,
        intervention_id: segment.intervention.map(|i| i.id.clone()),
    }
}

fn extend_line(line: &mut CalculationLine, end: NaiveDateTime) {
    line.end = end;
    line.duration_hours = hours_between(line.start, line.end);
    line.total = line_amount(line.duration_hours, line.rate, line.coefficient, line.bonus);
}

fn line_amount(hours: Decimal, rate: Decimal, coefficient: Decimal, bonus: Decimal) -> Decimal {
    hours * rate * coefficient * bonus
}
