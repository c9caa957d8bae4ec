//! Standalone intervention pricing.
//!
//! Used for per-intervention reporting. The intervention interval is priced
//! through the same segmentation, classification and coalescing as a full
//! activity, so the result matches the intervention's lines in any activity
//! that contains it.

use std::slice;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{ActivityType, CalculationLine, Intervention, Worker};

use super::accumulator::price_interval;
use super::rate_table::RateTable;

/// Result of pricing a single intervention in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionPayResult {
    /// The priced intervention.
    pub intervention_id: String,
    /// Billing lines covering the intervention interval.
    pub lines: Vec<CalculationLine>,
    /// Sum of the line totals.
    pub amount: Decimal,
}

/// Prices a single intervention for a worker.
///
/// Every instant of an intervention is classified by the intervention rules,
/// so the shift type of the enclosing activity plays no part.
///
/// # Errors
///
/// Returns `InvalidIntervention` if the intervention ends before it starts.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::{RateTable, price_intervention};
/// use shift_pay_engine::models::{Grade, Intervention, Worker};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// // Saturday 23:00 to 23:45 is a night intervention
/// let intervention = Intervention {
///     id: "inter-1".to_string(),
///     start: at("2023-10-28 23:00:00"),
///     end: at("2023-10-28 23:45:00"),
///     motif: "SAP".into(),
/// };
/// let worker = Worker::new("user-1", Grade::Sergent);
///
/// let priced = price_intervention(&intervention, &worker, &RateTable::default()).unwrap();
/// assert_eq!(priced.amount, Decimal::from_str("15.645").unwrap());
/// ```
pub fn price_intervention(
    intervention: &Intervention,
    worker: &Worker,
    rates: &RateTable,
) -> EngineResult<InterventionPayResult> {
    intervention.validate()?;

    let lines = price_interval(
        intervention.start,
        intervention.end,
        ActivityType::FreeGuard,
        slice::from_ref(intervention),
        &worker.config,
        rates.rate(worker.grade),
    );
    let amount: Decimal = lines.iter().map(|line| line.total).sum();

    debug!(
        intervention_id = %intervention.id,
        worker_id = %worker.id,
        lines = lines.len(),
        amount = %amount,
        "Priced intervention"
    );

    Ok(InterventionPayResult {
        intervention_id: intervention.id.clone(),
        lines,
        amount,
    })
}
